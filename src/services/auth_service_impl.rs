//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::Role;
use crate::services::auth_service::{AccountInfo, AuthError, AuthService};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError> {
        let created = self
            .store
            .create_user(username, password, Role::User, &self.security)
            .await?;

        match created {
            Some(user) => {
                tracing::info!("Registered user: {}", user.username);
                Ok(user.into())
            }
            None => Err(AuthError::DuplicateUsername),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccountInfo, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(user.into())
    }

    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, AuthError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(AccountInfo::from).collect())
    }

    async fn delete_account_cascade(&self, id: i32) -> Result<(), AuthError> {
        let removed = self.store.delete_user_cascade(id).await?;

        if !removed {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}
