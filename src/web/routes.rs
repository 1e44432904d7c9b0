//! Admin UI route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    admin_handler, create_link_handler, delete_link_handler, login_page_handler,
    login_submit_handler, logout_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Protected admin routes requiring authentication.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET  /admin` - Link list and creation form
/// - `POST /admin/create` - Create a link
/// - `POST /admin/delete/{id}` - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_handler))
        .route("/admin/create", post(create_link_handler))
        .route("/admin/delete/{id}", post(delete_link_handler))
}

/// Public routes without authentication.
///
/// # Endpoints
///
/// - `GET  /login` - Login page
/// - `POST /login` - Password check
/// - `GET  /logout` - Clear the auth cookie
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page_handler).post(login_submit_handler))
        .route("/logout", get(logout_handler))
}
