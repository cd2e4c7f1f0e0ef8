//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{Recipe, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
        /// The owning user does not exist.
        UnknownOwner { user_id: String } => "recipe owner {user_id} does not exist",
    }
}

/// Port for recipe storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a new recipe.
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// List a user's recipes ordered by title, then identifier.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;
}
