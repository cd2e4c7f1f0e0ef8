//! In-memory recipe store.
//!
//! Unlike the database adapter this store does not check that the owner
//! exists.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, UserId};

use super::lock;

/// [`RecipeRepository`] kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut recipes = lock(&self.recipes, RecipePersistenceError::query)?;
        if recipes.iter().any(|existing| existing.id() == recipe.id()) {
            return Err(RecipePersistenceError::query(format!(
                "recipe {} already exists",
                recipe.id()
            )));
        }
        recipes.push(recipe.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let recipes = lock(&self.recipes, RecipePersistenceError::query)?;
        let mut owned: Vec<Recipe> = recipes
            .iter()
            .filter(|recipe| recipe.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.title()
                .cmp(b.title())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(owned)
    }
}
