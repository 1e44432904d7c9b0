//! HTTP request handlers for the public endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod debug;
pub mod redirect;
pub mod root;
pub mod setup;

pub use debug::debug_handler;
pub use redirect::redirect_handler;
pub use root::root_handler;
pub use setup::setup_handler;
