//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::{
    auth_cookie_value, build_auth_cookie, build_expired_auth_cookie, set_cookie_value,
};

/// Template for the login page.
///
/// Renders `templates/login.html` with an optional error line above the
/// password field.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// Already authenticated browsers are sent straight to `/admin`.
pub async fn login_page_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = auth_cookie_value(&headers);
    if state.auth_service.is_authenticated(token.as_deref()) {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Checks the submitted password.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `/admin` with the `auth` cookie set on exact match
/// - **401 Unauthorized** with the login page re-rendered otherwise
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(token) = state.auth_service.login(&form.password) else {
        tracing::warn!("Rejected admin login attempt");
        let page = LoginTemplate {
            error: Some("Incorrect password".to_string()),
        };
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    };

    let cookie = build_auth_cookie(token, state.auth_service.cookie_max_age());
    tracing::info!("Admin logged in");

    Ok((
        [(SET_COOKIE, set_cookie_value(&cookie)?)],
        Redirect::to("/admin"),
    )
        .into_response())
}

/// Clears the auth cookie.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler() -> Result<Response, AppError> {
    let cookie = build_expired_auth_cookie();

    Ok((
        [(SET_COOKIE, set_cookie_value(&cookie)?)],
        Redirect::to("/login"),
    )
        .into_response())
}
