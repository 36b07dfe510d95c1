//! User and role models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// User account from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Hashed password (argon2)
    pub password: String,
    #[sqlx(skip)]
    pub roles: Vec<Role>,
}

/// Authenticated user as seen by handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles.into_iter().map(|r| r.name).collect(),
        }
    }
}

impl UserInfo {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Catalog changes are reserved to administrators
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.has_role(ROLE_ADMIN) {
            Ok(())
        } else {
            Err(AppError::Authorization("Недостаточно прав для изменения каталога".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> UserInfo {
        UserInfo {
            id: 1,
            username: "reader".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(user_with_roles(&[ROLE_USER, ROLE_ADMIN]).require_admin().is_ok());
        assert!(matches!(
            user_with_roles(&[ROLE_USER]).require_admin(),
            Err(AppError::Authorization(_))
        ));
        assert!(user_with_roles(&["admin"]).has_role(ROLE_ADMIN));
    }
}
