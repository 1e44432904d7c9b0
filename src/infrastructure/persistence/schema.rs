//! `links` table definitions for each backend.

use super::store::Backend;

const POSTGRES_LINKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS links (
    id BIGSERIAL PRIMARY KEY,
    alias TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    clicks BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// Millisecond timestamps keep most-recent-first ordering stable for links
// created within the same second.
const SQLITE_LINKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    alias TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    clicks INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

/// Returns the idempotent `CREATE TABLE` statement for `backend`.
pub fn links_table_ddl(backend: Backend) -> &'static str {
    match backend {
        Backend::Postgres => POSTGRES_LINKS_TABLE,
        Backend::Sqlite => SQLITE_LINKS_TABLE,
    }
}
