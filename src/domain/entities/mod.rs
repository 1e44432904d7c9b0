//! Core domain entities.
//!
//! The service has a single entity, [`Link`], with a separate [`NewLink`]
//! input struct for creation.

pub mod link;

pub use link::{Link, NewLink};
