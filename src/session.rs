//! Session keys and helpers.
//!
//! The session itself is owned by tower-sessions: a server-side store
//! addressed by a signed, encrypted per-client cookie. The pipeline only
//! reads and writes the named keys below, one atomic key operation at a
//! time, and never persists session state itself.

use time::Duration;
use tower_sessions::{
    cookie::Key, service::PrivateCookie, Expiry, MemoryStore, Session, SessionManagerLayer,
};

use crate::config::ConfigError;
use crate::error::AppResult;

/// Session key holding the id of the logged-in user.
pub const AUTHENTICATED_USER_ID: &str = "authenticatedUserID";

/// Session key for the one-shot flash message.
pub const FLASH: &str = "flash";

/// Session key for the per-session anti-forgery token.
pub const CSRF_TOKEN: &str = "csrfToken";

/// The concrete session layer the pipeline is composed with.
pub type SessionLayer = SessionManagerLayer<MemoryStore, PrivateCookie>;

/// Build the session layer.
///
/// The cookie is HTTP-only, scoped to `/`, marked Secure, and both signed and
/// encrypted with the configured key. These are security properties of the
/// pipeline, not tunables. Sessions expire `lifetime_hours` after their last
/// use, after which every key is inaccessible.
pub fn session_layer(secret: &[u8], lifetime_hours: i64) -> Result<SessionLayer, ConfigError> {
    let key = Key::try_from(secret).map_err(|e| {
        ConfigError::InvalidValue("SESSION_SECRET", format!("not a valid cookie key: {e}"))
    })?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_name("session")
        .with_http_only(true)
        .with_path("/".to_string())
        .with_secure(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(lifetime_hours)))
        .with_private(key))
}

/// Store a one-shot flash message for the next rendered page.
pub async fn put_flash(session: &Session, message: &str) -> AppResult<()> {
    session.insert(FLASH, message).await?;
    Ok(())
}

/// Read and clear the flash message, if one is pending.
pub async fn pop_flash(session: &Session) -> AppResult<Option<String>> {
    Ok(session.remove::<String>(FLASH).await?)
}
