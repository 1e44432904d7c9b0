//! Handler for the bare root path.

use axum::response::Redirect;

/// Sends visitors of `/` to the login page.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Redirect {
    Redirect::to("/login")
}
