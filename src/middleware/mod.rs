//! Middleware for the snipbin request pipeline
//!
//! Two chains are composed in `routes`: an outer chain on every request
//! (panic recovery, request logging, security headers) and an inner chain on
//! session-aware routes (session attach, CSRF guard, authentication resolve),
//! with the access-control gate added per protected route. Chain order is
//! load-bearing; see `routes::app`.

pub mod auth;
pub mod csrf;
pub mod logging;
pub mod recover;
pub mod security;

pub use auth::{authenticate, require_authentication, AuthFact};
pub use csrf::{csrf_guard, CsrfToken};
pub use logging::log_request;
pub use recover::recover_panic;
pub use security::secure_headers;
