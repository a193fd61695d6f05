//! Postgres-backed snippet store.

use axum::async_trait;
use sqlx::PgPool;

use super::{DataError, Snippet, SnippetStore};

/// `SnippetStore` backed by a Postgres pool.
#[derive(Clone)]
pub struct PgSnippetStore {
    pool: PgPool,
}

impl PgSnippetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetStore for PgSnippetStore {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<i64, DataError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO snippets (title, content, created, expires)
             VALUES ($1, $2, now(), now() + make_interval(days => $3))
             RETURNING id",
        )
        .bind(title)
        .bind(content)
        .bind(expires_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, DataError> {
        sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires
             FROM snippets WHERE expires > now() AND id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, DataError> {
        let snippets = sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires
             FROM snippets WHERE expires > now()
             ORDER BY created DESC LIMIT 10",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(snippets)
    }
}
