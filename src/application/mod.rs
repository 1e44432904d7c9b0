//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a small API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup and click recording
//! - [`services::auth_service::AuthService`] - Admin password and session cookie checks

pub mod services;
