//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence.
//!
//! # Modules
//!
//! - [`persistence`] - Backend-neutral store (PostgreSQL or SQLite) and the
//!   repository built on top of it

pub mod persistence;
