//! User storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use smart_laundry_core::Identifier;

use super::RepositoryError;
use crate::models::User;

/// Storage for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be read.
    async fn get(&self, id: &Identifier) -> Result<Option<User>, RepositoryError>;

    /// Insert `user` unless a user with the same identifier already exists.
    ///
    /// Returns whichever record is stored afterwards, so an existing user is
    /// never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be written.
    async fn get_or_insert(&self, user: User) -> Result<User, RepositoryError>;
}

/// Users held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Identifier, User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, id: &Identifier) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_or_insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        Ok(users.entry(user.id.clone()).or_insert(user).clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use smart_laundry_core::Role;

    fn user(id: &str, role: Role) -> User {
        User::new(
            Identifier::parse(id).unwrap(),
            role,
            chrono::Local::now().naive_local(),
        )
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryUserStore::new();
        let id = Identifier::parse("nobody@example.com").unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_or_insert_keeps_first_record() {
        let store = InMemoryUserStore::new();
        let first = store
            .get_or_insert(user("priya@example.com", Role::User))
            .await
            .unwrap();
        let second = store
            .get_or_insert(user("priya@example.com", Role::Admin))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(second.role, Role::User);
        assert_eq!(
            store.get(&first.id).await.unwrap().unwrap().created_at,
            first.created_at
        );
    }
}
