//! Web layer for the browser-based admin UI.
//!
//! Provides the login page and the link management page.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and form handlers
//! - [`middleware`] - Cookie auth gate
//! - [`notice`] - Outcome banners for form redirects
//! - [`routes`] - Route configuration
//! - [`session`] - Auth cookie helpers

pub mod handlers;
pub mod middleware;
pub mod notice;
pub mod routes;
pub mod session;
