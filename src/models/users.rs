//! Postgres-backed user store.

use axum::async_trait;
use sqlx::PgPool;

use super::{DataError, User, UserStore};

/// Work factor for bcrypt password hashing.
const BCRYPT_COST: u32 = 12;

/// `UserStore` backed by a Postgres pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), DataError> {
        let hashed = bcrypt::hash(password, BCRYPT_COST)?;

        sqlx::query(
            "INSERT INTO users (name, email, hashed_password, created, active)
             VALUES ($1, $2, $3, now(), TRUE)",
        )
        .bind(name)
        .bind(email)
        .bind(&hashed)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // users_uc_email is the unique constraint on users.email.
            sqlx::Error::Database(db) if db.constraint() == Some("users_uc_email") => {
                DataError::DuplicateEmail
            }
            _ => DataError::Sqlx(e),
        })?;

        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, DataError> {
        let row: Option<(i64, String)> = sqlx::query_as(
            "SELECT id, hashed_password FROM users WHERE email = $1 AND active = TRUE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let (id, hashed) = row.ok_or(DataError::InvalidCredentials)?;

        if bcrypt::verify(password, &hashed)? {
            Ok(id)
        } else {
            Err(DataError::InvalidCredentials)
        }
    }

    async fn get(&self, id: i64) -> Result<User, DataError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created, active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NoRecord)
    }
}
