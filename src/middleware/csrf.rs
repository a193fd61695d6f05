//! CSRF guard middleware
//!
//! Every session carries an unguessable anti-forgery token. State-mutating
//! requests must echo it back in the `csrf_token` form field; a missing or
//! mismatched token is rejected with 400 before any handler logic runs. The
//! current token is exposed through request extensions so render code can
//! embed it in forms. The token travels inside the session cookie, which is
//! HTTP-only, scoped to `/`, and Secure (see `session::session_layer`).

use axum::{
    body::Body,
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use rand::{rngs::OsRng, RngCore};
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::error::AppError;
use crate::session::CSRF_TOKEN;

/// Form field the token is submitted under.
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Upper bound on a buffered form body.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// The valid anti-forgery token for the current session, exposed to
/// render-time code through request extensions.
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

pub async fn csrf_guard(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Mint a token on first contact with this session.
    let token = match session.get::<String>(CSRF_TOKEN).await? {
        Some(t) => t,
        None => {
            let t = mint_token();
            session.insert(CSRF_TOKEN, &t).await?;
            t
        }
    };

    let (mut parts, body) = request.into_parts();
    parts.extensions.insert(CsrfToken(token.clone()));

    if !mutates_state(&parts.method) {
        return Ok(next.run(Request::from_parts(parts, body)).await);
    }

    // Buffer the form body to read the submitted token, then reattach it so
    // the handler can parse the same bytes.
    let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    match submitted_token(&bytes) {
        Some(submitted) if tokens_match(&submitted, &token) => {
            let request = Request::from_parts(parts, Body::from(bytes));
            Ok(next.run(request).await)
        }
        _ => Err(AppError::CsrfRejected),
    }
}

fn mutates_state(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// 32 bytes from the operating system CSPRNG, hex encoded.
fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time comparison so token checks leak no timing signal.
fn tokens_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// The last `csrf_token` value in the urlencoded body, per last-wins form
/// semantics.
fn submitted_token(body: &[u8]) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).ok()?;
    pairs
        .into_iter()
        .rev()
        .find(|(key, _)| key == CSRF_FORM_FIELD)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_tokens_are_unique_and_hex() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_comparison() {
        assert!(tokens_match("abc", "abc"));
        assert!(!tokens_match("abc", "abd"));
        assert!(!tokens_match("abc", "abcd"));
    }

    #[test]
    fn submitted_token_takes_the_last_value() {
        let body = b"title=x&csrf_token=first&csrf_token=second";
        assert_eq!(submitted_token(body), Some("second".to_string()));
        assert_eq!(submitted_token(b"title=x"), None);
    }

    #[test]
    fn post_put_patch_delete_require_validation() {
        assert!(mutates_state(&Method::POST));
        assert!(mutates_state(&Method::PUT));
        assert!(mutates_state(&Method::PATCH));
        assert!(mutates_state(&Method::DELETE));
        assert!(!mutates_state(&Method::GET));
        assert!(!mutates_state(&Method::HEAD));
    }
}
