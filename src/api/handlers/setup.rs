//! Handler for on-demand schema creation.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Creates the `links` table if it does not exist yet.
///
/// # Endpoint
///
/// `GET /setup`
///
/// Idempotent: running it against an existing table changes nothing.
///
/// # Response Codes
///
/// - **200 OK**: Table created or already present
/// - **500 Internal Server Error**: The DDL failed; the body carries the error
pub async fn setup_handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.store.ensure_schema().await {
        Ok(()) => {
            tracing::info!(backend = %state.store.backend(), "Schema verified via /setup");
            (
                StatusCode::OK,
                "Table 'links' created or verified.".to_string(),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Schema setup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database setup failed: {e}"),
            )
        }
    }
}
