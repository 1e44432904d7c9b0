//! Data Transfer Objects for JSON responses.

pub mod debug;
