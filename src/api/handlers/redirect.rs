//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Look up the link by alias
/// 2. Spawn the click increment without awaiting it
/// 3. Return 302 Found with the stored URL
///
/// # Click Tracking
///
/// The increment runs in a detached task. The redirect never waits for it
/// and a failed increment is only logged.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 500 Internal Server Error if the lookup fails.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&alias).await?;

    let location = HeaderValue::from_str(&link.url).map_err(|_| {
        AppError::internal(format!("Stored URL for '{alias}' is not a valid header value"))
    })?;

    state.link_service.record_click(link.id);

    Ok((StatusCode::FOUND, [(LOCATION, location)]))
}
