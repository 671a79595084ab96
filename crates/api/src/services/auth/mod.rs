//! Authentication service.
//!
//! Passwordless login: a one-time code is sent to the user's email or phone,
//! and exchanging it for a session token creates the account on first use.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, SessionTokens};

use std::sync::Arc;

use chrono::{Duration, Local};
use rand::Rng;
use tracing::instrument;

use smart_laundry_core::{Identifier, IdentifierKind, Role};

use crate::clock::Clock;
use crate::db::{ChallengeStore, UserStore};
use crate::models::{OtpChallenge, User};
use crate::services::delivery::OtpDelivery;
use crate::state::AppState;

/// Decides which identifiers are granted the admin role.
///
/// Evaluated once, when the user record is created.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    identifiers: Vec<String>,
}

impl AdminPolicy {
    #[must_use]
    pub const fn new(identifiers: Vec<String>) -> Self {
        Self { identifiers }
    }

    /// Whether `identifier` is on the admin list.
    ///
    /// Emails compare case-insensitively; anything else must match exactly.
    #[must_use]
    pub fn is_admin(&self, identifier: &Identifier) -> bool {
        let candidate = identifier.as_str();
        self.identifiers.iter().any(|admin| {
            if identifier.kind() == IdentifierKind::Email && admin.contains('@') {
                admin.eq_ignore_ascii_case(candidate)
            } else {
                admin == candidate
            }
        })
    }

    /// The role a new account for `identifier` receives.
    #[must_use]
    pub fn role_for(&self, identifier: &Identifier) -> Role {
        if self.is_admin(identifier) {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Result of a successful OTP login.
#[derive(Debug, Clone)]
pub struct Login {
    pub user: User,
    pub token: String,
}

/// Generate a 6-digit one-time code.
#[must_use]
pub fn generate_otp_code() -> String {
    let code: u32 = rand::rng().random_range(100_000..=999_999);
    code.to_string()
}

/// Authentication service.
///
/// Handles OTP issuance and verification, and resolves session tokens to
/// users.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    challenges: &'a dyn ChallengeStore,
    delivery: &'a Arc<dyn OtpDelivery>,
    clock: &'a dyn Clock,
    tokens: &'a SessionTokens,
    policy: &'a AdminPolicy,
    otp_ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Create an authentication service over the application's stores.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            users: state.stores().users.as_ref(),
            challenges: state.stores().challenges.as_ref(),
            delivery: state.delivery(),
            clock: state.clock(),
            tokens: state.tokens(),
            policy: state.admin_policy(),
            otp_ttl: state.config().otp_ttl,
        }
    }

    // =========================================================================
    // OTP Login
    // =========================================================================

    /// Issue a one-time code for `identifier` and send it in the background.
    ///
    /// Any pending code for the same identifier is replaced. Delivery failures
    /// are logged and do not affect the result.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidIdentifier` if the identifier is neither an
    /// email address nor a 10-digit phone number.
    #[instrument(skip(self))]
    pub async fn issue_challenge(&self, identifier: &str) -> Result<Identifier, AuthError> {
        let identifier = Identifier::parse(identifier)?;
        let code = generate_otp_code();
        let expires_at = self.clock.now() + self.otp_ttl;

        self.challenges
            .put(OtpChallenge::new(identifier.clone(), code.clone(), expires_at))
            .await?;

        let delivery = Arc::clone(self.delivery);
        let to = identifier.clone();
        tokio::spawn(async move {
            if let Err(e) = delivery.deliver(&to, &code).await {
                tracing::warn!(to = %to, error = %e, "OTP delivery failed");
            }
        });

        tracing::info!(identifier = %identifier, "OTP challenge issued");
        Ok(identifier)
    }

    /// Exchange a one-time code for a session.
    ///
    /// On success the challenge is consumed, the user is created if this is
    /// their first login, and a fresh session token is minted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either input is blank.
    /// Returns `AuthError::ChallengeNotFound` if no code is pending.
    /// Returns `AuthError::ChallengeExpired` if the code has expired (the
    /// challenge is discarded).
    /// Returns `AuthError::CodeMismatch` if the code is wrong (the challenge
    /// is kept).
    #[instrument(skip(self, code))]
    pub async fn verify(&self, identifier: &str, code: &str) -> Result<Login, AuthError> {
        if identifier.trim().is_empty() || code.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        // A malformed identifier can never have been issued a challenge.
        let identifier =
            Identifier::parse(identifier).map_err(|_| AuthError::ChallengeNotFound)?;

        let challenge = self
            .challenges
            .get(&identifier)
            .await?
            .ok_or(AuthError::ChallengeNotFound)?;

        let now = self.clock.now();
        if challenge.is_expired(now) {
            // Only the stale code; a code reissued since the read stays.
            self.challenges.consume(&identifier, &challenge.code).await?;
            return Err(AuthError::ChallengeExpired);
        }

        if !challenge.matches(code) {
            tracing::info!(identifier = %identifier, "OTP mismatch");
            return Err(AuthError::CodeMismatch);
        }

        // Two concurrent logins with the same code: only one may win.
        if !self.challenges.consume(&identifier, &challenge.code).await? {
            return Err(AuthError::ChallengeNotFound);
        }

        let created_at = now.with_timezone(&Local).naive_local();
        let role = self.policy.role_for(&identifier);
        let user = self
            .users
            .get_or_insert(User::new(identifier, role, created_at))
            .await?;
        let token = self.tokens.mint(&user.id, now)?;

        tracing::info!(user = %user.id, role = %user.role, "login succeeded");
        Ok(Login { user, token })
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Resolve an `Authorization` header value to the token's subject.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredential` if there is no header,
    /// `AuthError::InvalidToken` if it is not a valid bearer token, and
    /// `AuthError::TokenExpired` if the token is past its expiry.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identifier, AuthError> {
        let header = header.ok_or(AuthError::MissingCredential)?;
        let token = token::bearer_token(header)?;
        let claims = self.tokens.verify(token, self.clock.now())?;
        Identifier::parse(&claims.sub).map_err(|_| AuthError::InvalidToken)
    }

    /// The user record behind an authenticated identifier.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such user exists.
    pub async fn current_user(&self, identifier: &Identifier) -> Result<User, AuthError> {
        self.users
            .get(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Load the user and check they hold `role`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the user does not exist or holds a
    /// different role.
    pub async fn require_role(&self, identifier: &Identifier, role: Role) -> Result<User, AuthError> {
        match self.users.get(identifier).await? {
            Some(user) if user.role == role => Ok(user),
            _ => {
                tracing::warn!(user = %identifier, required = %role, "access denied");
                Err(AuthError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::LaundryConfig;
    use crate::db::{InMemoryChallengeStore, RepositoryError, Stores};
    use crate::services::delivery::LogDelivery;
    use secrecy::SecretString;

    fn state() -> (AppState, Arc<ManualClock>) {
        state_with(Stores::in_memory())
    }

    fn state_with(stores: Stores) -> (AppState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let mut config =
            LaundryConfig::with_secret(SecretString::from("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d"));
        config.admin_identifiers = vec!["Admin@Laundry.com".to_string(), "9999999999".to_string()];
        let state = AppState::from_parts(
            config,
            stores,
            Arc::new(LogDelivery),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (state, clock)
    }

    async fn pending_code(state: &AppState, identifier: &str) -> String {
        let id = Identifier::parse(identifier).unwrap();
        state
            .stores()
            .challenges
            .get(&id)
            .await
            .unwrap()
            .unwrap()
            .code
    }

    #[test]
    fn test_generate_otp_code_format() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_admin_policy() {
        let policy = AdminPolicy::new(vec!["admin@laundry.com".to_string(), "admin".to_string()]);
        assert!(policy.is_admin(&Identifier::parse("ADMIN@laundry.com").unwrap()));
        assert!(!policy.is_admin(&Identifier::parse("user@laundry.com").unwrap()));
        assert_eq!(
            policy.role_for(&Identifier::parse("9876543210").unwrap()),
            Role::User
        );
    }

    #[tokio::test]
    async fn test_issue_rejects_invalid_identifier() {
        let (state, _) = state();
        let err = state.auth().issue_challenge("not-an-email").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_issue_trims_identifier() {
        let (state, _) = state();
        let id = state
            .auth()
            .issue_challenge("  priya@example.com ")
            .await
            .unwrap();
        assert_eq!(id.as_str(), "priya@example.com");
        assert_eq!(pending_code(&state, "priya@example.com").await.len(), 6);
    }

    #[tokio::test]
    async fn test_verify_succeeds_once() {
        let (state, _) = state();
        let auth = state.auth();
        auth.issue_challenge("priya@example.com").await.unwrap();
        let code = pending_code(&state, "priya@example.com").await;

        let login = auth.verify("priya@example.com", &code).await.unwrap();
        assert_eq!(login.user.name, "priya");
        assert_eq!(login.user.role, Role::User);
        assert_eq!(auth.authenticate(Some(&format!("Bearer {}", login.token))).unwrap(), login.user.id);

        let again = auth.verify("priya@example.com", &code).await.unwrap_err();
        assert!(matches!(again, AuthError::ChallengeNotFound));
    }

    #[tokio::test]
    async fn test_verify_expired_discards_challenge() {
        let (state, clock) = state();
        let auth = state.auth();
        auth.issue_challenge("9876543210").await.unwrap();
        let code = pending_code(&state, "9876543210").await;

        clock.advance(Duration::seconds(301));
        let err = auth.verify("9876543210", &code).await.unwrap_err();
        assert!(matches!(err, AuthError::ChallengeExpired));

        let err = auth.verify("9876543210", &code).await.unwrap_err();
        assert!(matches!(err, AuthError::ChallengeNotFound));
    }

    /// Hands out whatever is stored, then lets a reissued code land.
    struct ReissueAfterRead {
        inner: InMemoryChallengeStore,
        reissued: OtpChallenge,
    }

    #[async_trait::async_trait]
    impl ChallengeStore for ReissueAfterRead {
        async fn put(&self, challenge: OtpChallenge) -> Result<(), RepositoryError> {
            self.inner.put(challenge).await
        }

        async fn get(
            &self,
            identifier: &Identifier,
        ) -> Result<Option<OtpChallenge>, RepositoryError> {
            let current = self.inner.get(identifier).await?;
            self.inner.put(self.reissued.clone()).await?;
            Ok(current)
        }

        async fn consume(&self, identifier: &Identifier, code: &str) -> Result<bool, RepositoryError> {
            self.inner.consume(identifier, code).await
        }
    }

    #[tokio::test]
    async fn test_verify_expired_keeps_reissued_code() {
        let id = Identifier::parse("9876543210").unwrap();
        let start = ManualClock::default().now();
        let inner = InMemoryChallengeStore::new();
        inner
            .put(OtpChallenge::new(id.clone(), "111111".to_owned(), start))
            .await
            .unwrap();
        let reissued = OtpChallenge::new(id.clone(), "222222".to_owned(), start + Duration::seconds(300));
        let store = Arc::new(ReissueAfterRead { inner, reissued });

        let (state, clock) = state_with(Stores {
            challenges: Arc::clone(&store) as Arc<dyn ChallengeStore>,
            ..Stores::in_memory()
        });
        clock.advance(Duration::seconds(1));

        let err = state.auth().verify("9876543210", "111111").await.unwrap_err();
        assert!(matches!(err, AuthError::ChallengeExpired));
        assert_eq!(store.inner.get(&id).await.unwrap().unwrap().code, "222222");
    }

    #[tokio::test]
    async fn test_verify_mismatch_keeps_challenge() {
        let (state, _) = state();
        let auth = state.auth();
        auth.issue_challenge("9876543210").await.unwrap();
        let code = pending_code(&state, "9876543210").await;
        let wrong = if code == "123456" { "654321" } else { "123456" };

        let err = auth.verify("9876543210", wrong).await.unwrap_err();
        assert!(matches!(err, AuthError::CodeMismatch));

        let login = auth.verify("9876543210", &format!(" {code} ")).await.unwrap();
        assert_eq!(login.user.phone, "9876543210");
    }

    #[tokio::test]
    async fn test_verify_missing_fields() {
        let (state, _) = state();
        let err = state.auth().verify("", "123456").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        let err = state.auth().verify("priya@example.com", " ").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_admin_role_from_allow_list() {
        let (state, _) = state();
        let auth = state.auth();
        auth.issue_challenge("admin@laundry.com").await.unwrap();
        let code = pending_code(&state, "admin@laundry.com").await;
        let login = auth.verify("admin@laundry.com", &code).await.unwrap();
        assert_eq!(login.user.role, Role::Admin);

        assert!(auth.require_role(&login.user.id, Role::Admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_require_role_unknown_user_is_forbidden() {
        let (state, _) = state();
        let id = Identifier::parse("ghost@example.com").unwrap();
        let err = state.auth().require_role(&id, Role::Admin).await.unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[tokio::test]
    async fn test_authenticate_errors() {
        let (state, clock) = state();
        let auth = state.auth();
        assert!(matches!(auth.authenticate(None), Err(AuthError::MissingCredential)));
        assert!(matches!(
            auth.authenticate(Some("Bearer nope")),
            Err(AuthError::InvalidToken)
        ));

        let id = Identifier::parse("priya@example.com").unwrap();
        let token = state.tokens().mint(&id, clock.now()).unwrap();
        clock.advance(Duration::hours(25));
        assert!(matches!(
            auth.authenticate(Some(&format!("Bearer {token}"))),
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_current_user_not_found() {
        let (state, _) = state();
        let id = Identifier::parse("ghost@example.com").unwrap();
        let err = state.auth().current_user(&id).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
