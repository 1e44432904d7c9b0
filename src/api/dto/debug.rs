//! DTOs for the debug endpoint.

use serde::Serialize;

/// Debug snapshot of the running process.
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub env: EnvPresence,
    pub backend: &'static str,

    /// `Connected` or `Error: <message>`.
    #[serde(rename = "dbStatus")]
    pub db_status: String,

    pub memory: MemoryUsage,
}

/// Whether the connection variables are set; values are never echoed.
#[derive(Debug, Serialize)]
pub struct EnvPresence {
    #[serde(rename = "POSTGRES_URL")]
    pub postgres_url: &'static str,

    #[serde(rename = "DATABASE_URL")]
    pub database_url: &'static str,

    #[serde(rename = "PORT")]
    pub port: Option<String>,
}

/// Process memory in bytes.
#[derive(Debug, Default, Serialize)]
pub struct MemoryUsage {
    pub rss: u64,
    pub r#virtual: u64,
}
