//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Price, Recipe, RecipeId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify, pool_error_message};
use super::models::{NewRecipeRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the [`RecipeRepository`] port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    RecipePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, owner: &UserId) -> RecipePersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => RecipePersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation { .. } => {
            RecipePersistenceError::unknown_owner(owner.to_string())
        }
        DieselFailure::UniqueViolation { .. } => {
            RecipePersistenceError::query("recipe identifier already exists")
        }
        DieselFailure::Query(message) => RecipePersistenceError::query(message),
    }
}

fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipePersistenceError> {
    let id = row.id;
    let invalid = |err: crate::domain::RecipeValidationError| {
        RecipePersistenceError::query(format!("stored recipe {id} is invalid: {err}"))
    };
    let price = Price::from_cents(row.price_cents).map_err(invalid)?;
    Recipe::from_parts(
        RecipeId::from_uuid(id),
        UserId::from_uuid(row.user_id),
        row.title,
        row.time_minutes,
        price,
        row.description,
    )
    .map_err(invalid)
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRecipeRow {
            id: *recipe.id().as_uuid(),
            user_id: *recipe.user_id().as_uuid(),
            title: recipe.title(),
            time_minutes: recipe.time_minutes(),
            price_cents: recipe.price().cents(),
            description: recipe.description(),
        };

        diesel::insert_into(recipes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, recipe.user_id()))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(user_id.as_uuid()))
            .order((recipes::title.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, user_id))?;

        rows.into_iter().map(row_to_recipe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row() -> RecipeRow {
        RecipeRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: "Steak and mushroom sauce".to_owned(),
            time_minutes: 5,
            price_cents: 500,
            description: String::new(),
        }
    }

    #[rstest]
    fn rows_become_recipes() {
        let recipe = row_to_recipe(row()).expect("valid row");
        assert_eq!(recipe.to_string(), "Steak and mushroom sauce");
        assert_eq!(recipe.price().to_string(), "5.00");
    }

    #[rstest]
    #[case(RecipeRow { title: " ".to_owned(), ..row() })]
    #[case(RecipeRow { time_minutes: -1, ..row() })]
    #[case(RecipeRow { price_cents: 100_000, ..row() })]
    fn corrupt_rows_surface_as_query_errors(#[case] row: RecipeRow) {
        let err = row_to_recipe(row).expect_err("invalid row");
        assert!(matches!(err, RecipePersistenceError::Query { .. }));
    }
}
