//! Route table and pipeline composition
//!
//! Two chains, applied as explicit ordered lists of tower layers:
//!
//! * outer, on every request: recovery -> request logging -> security headers
//! * inner, on session-aware routes: session attach -> CSRF guard ->
//!   authentication resolver
//!
//! The order is load-bearing. Recovery is outermost so it catches faults from
//! everything inside it; the CSRF guard and the authentication resolver need
//! an attached session; the access-control gate is a per-route layer running
//! after the resolver so it can read the freshly computed fact.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::app_state::AppState;
use crate::handlers::{
    create_snippet, create_snippet_form, home, login_user, login_user_form, logout_user, ping,
    show_snippet, signup_user, signup_user_form,
};
use crate::middleware::{
    authenticate, csrf_guard, log_request, recover_panic, require_authentication, secure_headers,
};
use crate::session::SessionLayer;

/// Build the application router.
pub fn app(state: AppState, session_layer: SessionLayer) -> Router {
    let protected = Router::new()
        .route(
            "/snippet/create",
            get(create_snippet_form).post(create_snippet),
        )
        .route("/user/logout", post(logout_user))
        .route_layer(from_fn(require_authentication));

    // Inner layers run top-down: session attach, then the CSRF guard, then
    // the authentication resolver, then any per-route gate.
    let dynamic = Router::new()
        .route("/", get(home))
        .route("/snippet/:id", get(show_snippet))
        .route("/user/signup", get(signup_user_form).post(signup_user))
        .route("/user/login", get(login_user_form).post(login_user))
        .merge(protected)
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(from_fn(csrf_guard))
        .layer(session_layer);

    // Outer layers, recovery outermost, wrap every route including static
    // files and the liveness probe.
    Router::new()
        .merge(dynamic)
        .route("/ping", get(ping))
        .nest_service("/static", ServeDir::new("ui/static"))
        .layer(from_fn(secure_headers))
        .layer(from_fn(log_request))
        .layer(from_fn(recover_panic))
        .with_state(state)
}
