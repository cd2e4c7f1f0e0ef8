//! In-memory identity store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserId};

use super::lock;

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    ids_by_email: HashMap<Email, UserId>,
}

/// [`UserRepository`] kept in process memory.
///
/// A single lock covers both indexes so the email uniqueness check and the
/// insert happen atomically, mirroring the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Users>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.lock().map_or(0, |users| users.by_id.len())
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users, UserPersistenceError::query)?;
        if users.ids_by_email.contains_key(user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        users.ids_by_email.insert(user.email().clone(), *user.id());
        users.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users
            .ids_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.by_id.get(id).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users, UserPersistenceError::query)?;
        let Some(previous_email) = users.by_id.get(user.id()).map(|u| u.email().clone()) else {
            return Err(UserPersistenceError::query(format!(
                "user {} not found",
                user.id()
            )));
        };
        if previous_email != *user.email() {
            if users.ids_by_email.contains_key(user.email()) {
                return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
            }
            users.ids_by_email.remove(&previous_email);
            users.ids_by_email.insert(user.email().clone(), *user.id());
        }
        users.by_id.insert(*user.id(), user.clone());
        Ok(())
    }
}
