//! Persistence adapter: one `Store` strategy, two SQL backends.
//!
//! - [`PgStore`] - remote PostgreSQL through a bounded pool
//! - [`SqliteStore`] - embedded single-file SQLite
//! - [`SqlLinkRepository`] - link queries written once against [`Store`]
//!
//! The backend is chosen once by [`connect`] and shared for the life of the
//! process.

pub mod placeholders;
pub mod postgres;
pub mod schema;
pub mod sql_link_repository;
pub mod sqlite;
pub mod store;
pub mod value;

pub use postgres::PgStore;
pub use sql_link_repository::SqlLinkRepository;
pub use sqlite::SqliteStore;
pub use store::{Backend, QueryResult, StatementKind, Store, StoreError};
pub use value::{Record, SqlValue};

use std::sync::Arc;

use crate::config::Config;

/// Opens the store selected by `config`.
///
/// A configured remote connection string selects PostgreSQL; otherwise the
/// SQLite file at `config.sqlite_path` is opened, created if missing.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or the file cannot be
/// opened.
pub async fn connect(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.db_max_connections).await?;
            tracing::info!("Connected to PostgreSQL database");
            Ok(Arc::new(store))
        }
        None => {
            let store = SqliteStore::open(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");
            Ok(Arc::new(store))
        }
    }
}
