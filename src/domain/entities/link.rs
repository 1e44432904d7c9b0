//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored alias-to-URL mapping with its click counter.
///
/// `alias` and `url` never change after creation; only `clicks` is mutated,
/// and only upward.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        alias: String,
        url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            alias,
            url,
            clicks,
            created_at,
        }
    }

    /// Builds the public short URL for this link on `host`.
    pub fn short_url(&self, host: &str) -> String {
        format!("{}/{}", host.trim_end_matches('/'), self.alias)
    }
}

/// Input data for creating a new link.
///
/// `url` is expected to be normalized already.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub alias: String,
    pub url: String,
}
