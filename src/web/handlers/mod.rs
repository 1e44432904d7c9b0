//! HTML template rendering handlers for the admin UI.

mod admin;
mod login;

pub use admin::{admin_handler, create_link_handler, delete_link_handler};
pub use login::{login_page_handler, login_submit_handler, logout_handler};
