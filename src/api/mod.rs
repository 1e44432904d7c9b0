//! Public HTTP layer: redirects and operational endpoints.
//!
//! # Modules
//!
//! - [`dto`] - JSON response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
