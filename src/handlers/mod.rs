//! HTTP request handlers

pub mod health;
pub mod snippets;
pub mod users;

pub use health::ping;
pub use snippets::{create_snippet, create_snippet_form, home, show_snippet};
pub use users::{login_user, login_user_form, logout_user, signup_user, signup_user_form};

use axum::response::Html;
use tower_sessions::Session;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::middleware::{AuthFact, CsrfToken};
use crate::render::TemplateData;
use crate::session;

/// Render a page with the per-request defaults filled in: current year,
/// pending flash message (popped from the session), authentication fact, and
/// the CSRF token for embedded forms. `fill` sets the page-specific fields.
pub(crate) async fn render_page(
    state: &AppState,
    session: &Session,
    fact: AuthFact,
    csrf: &CsrfToken,
    page: &str,
    fill: impl FnOnce(&mut TemplateData),
) -> AppResult<Html<String>> {
    let mut data = TemplateData::new();
    data.flash = session::pop_flash(session).await?;
    data.is_authenticated = fact.is_authenticated;
    data.csrf_token = csrf.0.clone();
    fill(&mut data);

    Ok(Html(state.renderer.render(page, &data)?))
}
