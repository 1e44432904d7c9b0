//! Cookie-based authentication middleware for the admin pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;
use crate::web::session::auth_cookie_value;

/// Authenticates admin requests using the `auth` cookie.
///
/// # Authentication Flow
///
/// 1. Extract the `auth` cookie from the request
/// 2. Check it via [`crate::application::services::AuthService::is_authenticated`]
/// 3. On success, continue to the handler
/// 4. Otherwise redirect to `/login`; the handler never runs
///
/// # Example
///
/// ```rust,ignore
/// let protected = web::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let token = auth_cookie_value(req.headers());

    if st.auth_service.is_authenticated(token.as_deref()) {
        Ok(next.run(req).await)
    } else {
        tracing::debug!(path = %req.uri().path(), "Unauthenticated admin request");
        Err(Redirect::to("/login"))
    }
}
