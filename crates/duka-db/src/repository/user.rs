//! # User Repository
//!
//! Database operations for user accounts and their preferences.
//!
//! Credentials (the password hash) never leave this layer except inside
//! [`UserRecord`], which only the auth service consumes; everything else
//! reads the hash-free [`UserProfile`] projection.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::{Currency, Language, UserProfile};

/// A full user row, including the credential hash.
///
/// Only the auth service should hold one of these; hand out
/// [`UserProfile`] everywhere else.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub language: Language,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// The hash-free projection of this record.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id.clone(),
            email: self.email.clone(),
            language: self.language,
            currency: self.currency,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, user: &UserRecord) -> DbResult<()> {
        debug!(email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, language, currency, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.language)
        .bind(user.currency)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Looks a user up by email (sign-in path).
    ///
    /// ## Returns
    /// * `Ok(None)` - no account with that email
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, language, currency, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Reads the hash-free profile of a user.
    pub async fn get_profile(&self, user_id: &str) -> DbResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id AS user_id, email, language, currency
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Updates a user's language and currency preferences.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - user does not exist
    pub async fn update_preferences(
        &self,
        user_id: &str,
        language: Language,
        currency: Currency,
    ) -> DbResult<()> {
        debug!(user_id = %user_id, language = %language, currency = %currency, "Updating preferences");

        let result = sqlx::query(
            r#"
            UPDATE users SET language = ?2, currency = ?3
            WHERE id = ?1
            "#,
        )
        .bind(user_id)
        .bind(language)
        .bind(currency)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", user_id));
        }

        Ok(())
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn record(email: &str) -> UserRecord {
        UserRecord {
            id: generate_user_id(),
            email: email.to_string(),
            password_hash: "$argon2id$fake-hash".to_string(),
            language: Language::Fr,
            currency: Currency::Cdf,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = record("amina@duka.shop");

        db.users().insert(&user).await.unwrap();

        let found = db.users().find_by_email("amina@duka.shop").await.unwrap();
        let found = found.expect("user should exist");
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, user.password_hash);

        let missing = db.users().find_by_email("nobody@duka.shop").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.users().insert(&record("amina@duka.shop")).await.unwrap();
        let err = db.users().insert(&record("amina@duka.shop")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_preferences_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = record("amina@duka.shop");
        db.users().insert(&user).await.unwrap();

        db.users()
            .update_preferences(&user.id, Language::Sw, Currency::Usd)
            .await
            .unwrap();

        let profile = db.users().get_profile(&user.id).await.unwrap().unwrap();
        assert_eq!(profile.language, Language::Sw);
        assert_eq!(profile.currency, Currency::Usd);
        assert_eq!(profile.email, "amina@duka.shop");
    }

    #[tokio::test]
    async fn test_update_preferences_missing_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .users()
            .update_preferences("no-such-id", Language::En, Currency::Eur)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
