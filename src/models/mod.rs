//! Domain models and the data-access contracts the pipeline consumes.

mod snippets;
mod users;

pub use snippets::PgSnippetStore;
pub use users::PgUserStore;

use axum::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Data-access errors. `NoRecord`, `InvalidCredentials` and `DuplicateEmail`
/// are expected outcomes handled at the call site; anything else is an
/// infrastructure failure surfaced as a server error.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no matching record found")]
    NoRecord,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// A registered user. `active` gates authentication: a deactivated account
/// keeps its row but can no longer hold an authenticated session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub active: bool,
}

/// A shared snippet with a fixed expiry horizon.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// User persistence and credential verification.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user with a bcrypt-hashed password. Returns
    /// `DataError::DuplicateEmail` when the email is already registered.
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), DataError>;

    /// Verify credentials and return the user id. Unknown email, deactivated
    /// account, and wrong password all map to `DataError::InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, DataError>;

    /// Fetch a user by id; `DataError::NoRecord` when the id resolves to
    /// nothing.
    async fn get(&self, id: i64) -> Result<User, DataError>;
}

/// Snippet persistence.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Insert a snippet expiring `expires_days` from now; returns the new id.
    async fn insert(&self, title: &str, content: &str, expires_days: i32)
        -> Result<i64, DataError>;

    /// Fetch an unexpired snippet by id.
    async fn get(&self, id: i64) -> Result<Snippet, DataError>;

    /// The ten most recently created unexpired snippets.
    async fn latest(&self) -> Result<Vec<Snippet>, DataError>;
}
