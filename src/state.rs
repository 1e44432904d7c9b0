//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::infrastructure::persistence::{SqlLinkRepository, Store};

/// Link service bound to the store-backed repository.
pub type AppLinkService = LinkService<SqlLinkRepository>;

/// Process-wide dependencies, resolved once at startup.
///
/// The store is chosen before the state is built and never swapped; handlers
/// receive it through this struct rather than a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub link_service: Arc<AppLinkService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires services on top of an opened store.
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        let link_repository = Arc::new(SqlLinkRepository::new(store.clone()));

        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            auth_service: Arc::new(AuthService::new(
                config.admin_password.clone(),
                config.auth_cookie_max_age,
            )),
            store,
        }
    }
}
