//! # Auth Service
//!
//! Email/password accounts, the process-local session, and user
//! preferences (language + currency).
//!
//! ## Credential Handling
//! Passwords are hashed with Argon2id (salted, memory-hard) before they
//! ever reach the gateway; plaintext exists only transiently on the
//! sign-up/sign-in path. Sign-in failures never reveal whether the email
//! or the password was wrong.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use duka_core::validation::{validate_email, validate_password};
use duka_core::{Currency, Language, UserProfile};
use duka_db::{Database, UserRecord};

use crate::error::{ShopError, ShopResult};
use crate::state::feed::{ChangeFeed, Collection};
use crate::state::session::{Session, SessionState};

/// Account and session management.
#[derive(Debug, Clone)]
pub struct AuthService {
    db: Database,
    session: SessionState,
    feed: ChangeFeed,
}

impl AuthService {
    /// Creates an auth service over the given database and session slot.
    pub fn new(db: Database, session: SessionState, feed: ChangeFeed) -> Self {
        AuthService { db, session, feed }
    }

    /// Registers a new account and signs it in.
    ///
    /// ## Behavior
    /// - Email is normalized (trimmed, lowercased) before storage
    /// - Rejects malformed emails and short passwords locally
    /// - A duplicate email surfaces as a validation error
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        language: Language,
        currency: Currency,
    ) -> ShopResult<UserProfile> {
        debug!(email = %email, "sign_up");

        validate_email(email)?;
        validate_password(password)?;

        let email = email.trim().to_ascii_lowercase();

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ShopError::Internal(format!("password hashing failed: {e}")))?
            .to_string();

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            language,
            currency,
            created_at: Utc::now(),
        };

        self.db.users().insert(&record).await?;

        let profile = record.profile();
        self.start_session(&profile);

        info!(user_id = %profile.user_id, "Account created");
        Ok(profile)
    }

    /// Signs an existing account in.
    pub async fn sign_in(&self, email: &str, password: &str) -> ShopResult<UserProfile> {
        debug!(email = %email, "sign_in");

        let email = email.trim().to_ascii_lowercase();

        let Some(record) = self.db.users().find_by_email(&email).await? else {
            warn!("Sign-in attempt for unknown email");
            return Err(ShopError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| ShopError::Internal(format!("stored hash unreadable: {e}")))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            warn!(user_id = %record.id, "Sign-in attempt with wrong password");
            return Err(ShopError::InvalidCredentials);
        }

        let profile = record.profile();
        self.start_session(&profile);

        info!(user_id = %profile.user_id, "Signed in");
        Ok(profile)
    }

    /// Ends the current session. Idempotent.
    pub fn sign_out(&self) {
        if let Some(session) = self.session.sign_out() {
            info!(user_id = %session.user_id, "Signed out");
        }
    }

    /// Returns the current session, if someone is signed in.
    pub fn current_session(&self) -> Option<Session> {
        self.session.current()
    }

    /// Reads the signed-in user's profile.
    pub async fn profile(&self) -> ShopResult<UserProfile> {
        let owner_id = self.session.owner_id()?;

        self.db
            .users()
            .get_profile(&owner_id)
            .await?
            .ok_or_else(|| ShopError::not_found("User", &owner_id))
    }

    /// Updates the signed-in user's language/currency preferences.
    pub async fn update_preferences(
        &self,
        language: Language,
        currency: Currency,
    ) -> ShopResult<UserProfile> {
        let owner_id = self.session.owner_id()?;
        debug!(user_id = %owner_id, language = %language, currency = %currency, "update_preferences");

        self.db
            .users()
            .update_preferences(&owner_id, language, currency)
            .await?;
        self.feed.publish(Collection::Profiles, &owner_id);

        self.profile().await
    }

    fn start_session(&self, profile: &UserProfile) {
        self.session.sign_in(Session {
            user_id: profile.user_id.clone(),
            email: profile.email.clone(),
            signed_in_at: Utc::now(),
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use duka_db::DbConfig;

    async fn auth() -> AuthService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AuthService::new(db, SessionState::new(), ChangeFeed::new())
    }

    #[tokio::test]
    async fn test_sign_up_starts_session() {
        let auth = auth().await;

        let profile = auth
            .sign_up("Amina@Duka.shop", "s3cret-pass", Language::Sw, Currency::Cdf)
            .await
            .unwrap();

        // Email normalized
        assert_eq!(profile.email, "amina@duka.shop");
        assert_eq!(profile.language, Language::Sw);

        let session = auth.current_session().unwrap();
        assert_eq!(session.user_id, profile.user_id);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_bad_input() {
        let auth = auth().await;

        assert!(matches!(
            auth.sign_up("not-an-email", "s3cret-pass", Language::Fr, Currency::Usd)
                .await,
            Err(ShopError::Validation(_))
        ));
        assert!(matches!(
            auth.sign_up("amina@duka.shop", "short", Language::Fr, Currency::Usd)
                .await,
            Err(ShopError::Validation(_))
        ));
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = auth().await;
        auth.sign_up("amina@duka.shop", "s3cret-pass", Language::Fr, Currency::Usd)
            .await
            .unwrap();

        let err = auth
            .sign_up("amina@duka.shop", "other-pass-123", Language::Fr, Currency::Usd)
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sign_in_round_trip() {
        let auth = auth().await;
        auth.sign_up("amina@duka.shop", "s3cret-pass", Language::Fr, Currency::Usd)
            .await
            .unwrap();
        auth.sign_out();
        assert!(auth.current_session().is_none());

        let profile = auth.sign_in("amina@duka.shop", "s3cret-pass").await.unwrap();
        assert_eq!(profile.email, "amina@duka.shop");
        assert!(auth.current_session().is_some());
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_uniform() {
        let auth = auth().await;
        auth.sign_up("amina@duka.shop", "s3cret-pass", Language::Fr, Currency::Usd)
            .await
            .unwrap();
        auth.sign_out();

        let wrong_password = auth
            .sign_in("amina@duka.shop", "wrong-pass-99")
            .await
            .unwrap_err();
        let unknown_email = auth
            .sign_in("nobody@duka.shop", "s3cret-pass")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ShopError::InvalidCredentials));
        assert!(matches!(unknown_email, ShopError::InvalidCredentials));
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let auth = auth().await;
        auth.sign_out();
        auth.sign_out();
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn test_update_preferences() {
        let auth = auth().await;
        auth.sign_up("amina@duka.shop", "s3cret-pass", Language::Fr, Currency::Usd)
            .await
            .unwrap();

        let profile = auth
            .update_preferences(Language::En, Currency::Eur)
            .await
            .unwrap();
        assert_eq!(profile.language, Language::En);
        assert_eq!(profile.currency, Currency::Eur);

        // Visible on a fresh profile read too
        let read_back = auth.profile().await.unwrap();
        assert_eq!(read_back.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_preferences_require_session() {
        let auth = auth().await;

        assert!(matches!(
            auth.update_preferences(Language::En, Currency::Eur).await,
            Err(ShopError::NotSignedIn)
        ));
        assert!(matches!(auth.profile().await, Err(ShopError::NotSignedIn)));
    }
}
