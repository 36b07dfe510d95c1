//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::UserStore;
use crate::{
    error::AppResult,
    models::user::{Role, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn roles_of(&self, user_id: i64) -> AppResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name
            FROM roles r
            JOIN users_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(mut user) => {
                user.roles = self.roles_of(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        roles: Vec<String>,
    ) -> AppResult<User> {
        let mut tx = self.pool.begin().await?;

        let mut user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password) VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        for name in roles {
            // No-op update so RETURNING yields the existing row too
            let role = sqlx::query_as::<_, Role>(
                r#"
                INSERT INTO roles (name) VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id, name
                "#,
            )
            .bind(&name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO users_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user.id)
            .bind(role.id)
            .execute(&mut *tx)
            .await?;

            user.roles.push(role);
        }

        tx.commit().await?;
        Ok(user)
    }
}
