//! Authentication middleware
//!
//! `authenticate` resolves the session's stored user id into a per-request
//! authentication fact; `require_authentication` gates individual routes on
//! that fact. Resolution and gating are separate stages so routes choose
//! whether authentication is required, while every dynamic route still gets
//! the fact attached.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::DataError;
use crate::session::AUTHENTICATED_USER_ID;

/// Derived, per-request authentication fact. Recomputed from the session and
/// a live user lookup on every request; never cached across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthFact {
    pub is_authenticated: bool,
}

/// Resolve the session's user id into an `AuthFact` attached to the request.
///
/// A session without a user id is anonymous and triggers no lookup. An id
/// that resolves to no record or to a deactivated account is stale: the key
/// is removed and the request continues as anonymous rather than being
/// rejected. Only an unexpected lookup failure aborts the request.
pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id: Option<i64> = session.get(AUTHENTICATED_USER_ID).await?;

    let Some(id) = user_id else {
        request.extensions_mut().insert(AuthFact::default());
        return Ok(next.run(request).await);
    };

    match state.users.get(id).await {
        Ok(user) if user.active => {
            request
                .extensions_mut()
                .insert(AuthFact { is_authenticated: true });
            Ok(next.run(request).await)
        }
        Ok(_) | Err(DataError::NoRecord) => {
            session.remove::<i64>(AUTHENTICATED_USER_ID).await?;
            request.extensions_mut().insert(AuthFact::default());
            Ok(next.run(request).await)
        }
        Err(e) => Err(AppError::from(e)),
    }
}

/// Gate a route on the resolved authentication fact.
///
/// Unauthenticated requests are redirected to the login page and the wrapped
/// handler never runs. Authenticated responses are marked `Cache-Control:
/// no-store` so pages behind authentication never land in a shared or
/// browser cache.
pub async fn require_authentication(request: Request, next: Next) -> Response {
    let fact = request
        .extensions()
        .get::<AuthFact>()
        .copied()
        .unwrap_or_default();

    if !fact.is_authenticated {
        return Redirect::to("/user/login").into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
