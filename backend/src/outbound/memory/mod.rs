//! Process-local adapters backed by mutex-guarded maps.
//!
//! Used when no database URL is configured and throughout the test suites.
//! State lives only as long as the adapter value.

mod recipe_repository;
mod token_repository;
mod user_repository;

pub use recipe_repository::InMemoryRecipeRepository;
pub use token_repository::InMemoryTokenRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock a store, reporting poisoning through the adapter's own error type.
fn lock<'a, T, E>(
    store: &'a Mutex<T>,
    on_poison: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    store
        .lock()
        .map_err(|err| on_poison(format!("in-memory store poisoned: {err}")))
}
