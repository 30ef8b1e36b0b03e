//! Domain service for registration, login, and account administration.

use serde::Serialize;
use thiserror::Error;

use crate::models::Role;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    /// Single generic credential failure. Unknown usernames and wrong
    /// passwords collapse into this variant so the error surface does not
    /// reveal which usernames exist.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Account DTO for responses (never carries the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub created_at: String,
}

impl From<crate::db::User> for AccountInfo {
    fn from(user: crate::db::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Post-login landing page, decided in exactly one place.
#[must_use]
pub const fn post_login_redirect(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Coach => "/coach",
        Role::User => "/dashboard",
    }
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the `user` role. Elevated roles only come
    /// from database seeding.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateUsername`] if the username is taken.
    async fn register(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError>;

    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any credential failure.
    async fn login(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError>;

    /// Lists every account, for the admin dashboard.
    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, AuthError>;

    /// Deletes an account and all workouts it owns. Comments on those
    /// workouts are deliberately left behind (current behavior, covered by
    /// tests).
    async fn delete_account_cascade(&self, id: i32) -> Result<(), AuthError>;
}
