//! Snippet pages: listing, display, creation.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use tower_sessions::Session;

use super::render_page;
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::{AuthFact, CsrfToken};
use crate::session;

/// GET / — the ten most recent unexpired snippets.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Html<String>> {
    let snippets = state.snippets.latest().await?;
    render_page(&state, &session, fact, &csrf, "home", |data| {
        data.snippets = snippets;
    })
    .await
}

/// GET /snippet/:id
///
/// An unparseable or non-positive id gets the same generic not-found response
/// as an unknown one.
pub async fn show_snippet(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id: i64 = id.parse().map_err(|_| AppError::NotFound)?;
    if id < 1 {
        return Err(AppError::NotFound);
    }

    let snippet = state.snippets.get(id).await?;
    render_page(&state, &session, fact, &csrf, "show", |data| {
        data.snippet = Some(snippet);
    })
    .await
}

/// GET /snippet/create — blank creation form.
pub async fn create_snippet_form(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Html<String>> {
    render_page(&state, &session, fact, &csrf, "create", |data| {
        data.form = Some(forms::Form::empty());
    })
    .await
}

/// POST /snippet/create
pub async fn create_snippet(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let mut form = forms::Form::new(pairs);
    form.required(&["title", "content", "expires"]);
    form.max_length("title", 100);
    form.permitted_values("expires", &["30", "7", "1"]);

    if !form.valid() {
        let page = render_page(&state, &session, fact, &csrf, "create", |data| {
            data.form = Some(form);
        })
        .await?;
        return Ok(page.into_response());
    }

    // permitted_values already pinned "expires" to a small integer.
    let expires_days: i32 = form
        .get("expires")
        .parse()
        .map_err(|_| AppError::BadRequest("invalid expires value".to_string()))?;

    let id = state
        .snippets
        .insert(form.get("title"), form.get("content"), expires_days)
        .await?;

    session::put_flash(&session, "Snippet successfully created!").await?;

    Ok(Redirect::to(&format!("/snippet/{id}")).into_response())
}
