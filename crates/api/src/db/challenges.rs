//! OTP challenge storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use smart_laundry_core::Identifier;

use super::RepositoryError;
use crate::models::OtpChallenge;

/// Storage for pending OTP challenges, at most one per identifier.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Store a challenge, replacing any pending one for the same identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be written.
    async fn put(&self, challenge: OtpChallenge) -> Result<(), RepositoryError>;

    /// The pending challenge for `identifier`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be read.
    async fn get(&self, identifier: &Identifier) -> Result<Option<OtpChallenge>, RepositoryError>;

    /// Remove the pending challenge only if it still carries `code`.
    ///
    /// Returns `true` if this call removed it. A `false` means another request
    /// consumed or replaced the challenge first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be written.
    async fn consume(&self, identifier: &Identifier, code: &str) -> Result<bool, RepositoryError>;
}

/// Challenges held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryChallengeStore {
    challenges: RwLock<HashMap<Identifier, OtpChallenge>>,
}

impl InMemoryChallengeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeStore for InMemoryChallengeStore {
    async fn put(&self, challenge: OtpChallenge) -> Result<(), RepositoryError> {
        self.challenges
            .write()
            .await
            .insert(challenge.identifier.clone(), challenge);
        Ok(())
    }

    async fn get(&self, identifier: &Identifier) -> Result<Option<OtpChallenge>, RepositoryError> {
        Ok(self.challenges.read().await.get(identifier).cloned())
    }

    async fn consume(&self, identifier: &Identifier, code: &str) -> Result<bool, RepositoryError> {
        let mut challenges = self.challenges.write().await;
        match challenges.get(identifier) {
            Some(c) if c.code == code => {
                challenges.remove(identifier);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
