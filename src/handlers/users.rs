//! User pages: signup, login, logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use tower_sessions::Session;

use super::render_page;
use crate::app_state::AppState;
use crate::error::AppResult;
use crate::forms::{self, EMAIL_RX};
use crate::middleware::{AuthFact, CsrfToken};
use crate::models::DataError;
use crate::session::{self, AUTHENTICATED_USER_ID};

/// GET /user/signup
pub async fn signup_user_form(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Html<String>> {
    render_page(&state, &session, fact, &csrf, "signup", |data| {
        data.form = Some(forms::Form::empty());
    })
    .await
}

/// POST /user/signup
pub async fn signup_user(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let mut form = forms::Form::new(pairs);
    form.required(&["name", "email", "password"]);
    form.max_length("name", 255);
    form.max_length("email", 255);
    form.matches_pattern("email", &EMAIL_RX);
    form.min_length("password", 10);

    if !form.valid() {
        let page = render_page(&state, &session, fact, &csrf, "signup", |data| {
            data.form = Some(form);
        })
        .await?;
        return Ok(page.into_response());
    }

    match state
        .users
        .insert(form.get("name"), form.get("email"), form.get("password"))
        .await
    {
        Ok(()) => {}
        Err(DataError::DuplicateEmail) => {
            form.errors.add("email", "Address is already in use");
            let page = render_page(&state, &session, fact, &csrf, "signup", |data| {
                data.form = Some(form);
            })
            .await?;
            return Ok(page.into_response());
        }
        Err(e) => return Err(e.into()),
    }

    session::put_flash(&session, "Your signup was successful. Please log in.").await?;

    Ok(Redirect::to("/user/login").into_response())
}

/// GET /user/login
pub async fn login_user_form(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
) -> AppResult<Html<String>> {
    render_page(&state, &session, fact, &csrf, "login", |data| {
        data.form = Some(forms::Form::empty());
    })
    .await
}

/// POST /user/login
pub async fn login_user(
    State(state): State<AppState>,
    session: Session,
    Extension(fact): Extension<AuthFact>,
    Extension(csrf): Extension<CsrfToken>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let mut form = forms::Form::new(pairs);

    let id = match state
        .users
        .authenticate(form.get("email"), form.get("password"))
        .await
    {
        Ok(id) => id,
        Err(DataError::InvalidCredentials) => {
            form.errors.add("generic", "Email or Password is incorrect");
            let page = render_page(&state, &session, fact, &csrf, "login", |data| {
                data.form = Some(form);
            })
            .await?;
            return Ok(page.into_response());
        }
        Err(e) => return Err(e.into()),
    };

    session.insert(AUTHENTICATED_USER_ID, id).await?;

    Ok(Redirect::to("/snippet/create").into_response())
}

/// POST /user/logout
pub async fn logout_user(session: Session) -> AppResult<Response> {
    session.remove::<i64>(AUTHENTICATED_USER_ID).await?;
    session::put_flash(&session, "You've been logged out successfully!").await?;

    Ok(Redirect::to("/").into_response())
}
