//! Authentication and user account service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::user::{UserInfo, ROLE_ADMIN, ROLE_USER},
    repository::UserStore,
};

const INVALID_CREDENTIALS: &str = "Неверное имя пользователя или пароль";

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
}

impl UsersService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Check a username/password pair and return the account with its roles
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<UserInfo> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login attempt for unknown user {}", username);
                AppError::Authentication(INVALID_CREDENTIALS.to_string())
            })?;

        let hash = user.password.clone();
        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))??;

        if !valid {
            tracing::warn!("Wrong password for user {}", username);
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        Ok(UserInfo::from(user))
    }

    /// Create the account unless it already exists; existing accounts are left untouched
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        roles: &[&str],
    ) -> AppResult<UserInfo> {
        if let Some(user) = self.store.find_by_username(username).await? {
            tracing::debug!("User {} already exists", username);
            return Ok(UserInfo::from(user));
        }

        let hash = hash_password(password)?;
        let roles = roles.iter().map(|r| r.to_string()).collect();
        let user = self.store.insert(username, &hash, roles).await?;
        tracing::info!("Created user {}", user.username);
        Ok(UserInfo::from(user))
    }

    /// Bootstrap the administrator account from configuration
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<UserInfo> {
        self.ensure_user(username, password, &[ROLE_USER, ROLE_ADMIN]).await
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
