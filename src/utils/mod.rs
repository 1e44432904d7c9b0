//! Utility functions for alias generation and URL processing.
//!
//! - [`code_generator`] - Random alias generation and custom alias validation
//! - [`url_normalizer`] - Scheme normalization for target URLs

pub mod code_generator;
pub mod url_normalizer;
