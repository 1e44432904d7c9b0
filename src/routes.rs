//! Top-level router configuration combining public and admin routes.
//!
//! # Route Structure
//!
//! - `GET  /`                   - Redirect to `/login`
//! - `GET  /login`, `/logout`   - Session handling (public)
//! - `POST /login`              - Password check (public)
//! - `/admin/*`                 - Link management (cookie required)
//! - `GET  /debug`              - Runtime introspection (public)
//! - `GET  /setup`              - Idempotent table creation (public)
//! - `GET  /{alias}`            - Short link redirect (public)
//!
//! Static segments win over `/{alias}`, so a link can never shadow a route.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Cookie gate on the admin routes
//!
//! Trailing-slash normalization is applied around the finished router in
//! [`crate::server`], since it has to run before routing.

use crate::api::handlers::{debug_handler, redirect_handler, root_handler, setup_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> Router {
    let admin = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    Router::new()
        .route("/", get(root_handler))
        .route("/debug", get(debug_handler))
        .route("/setup", get(setup_handler))
        .route("/{alias}", get(redirect_handler))
        .merge(web::routes::public_routes())
        .merge(admin)
        .with_state(state)
        .layer(tracing::layer())
}
