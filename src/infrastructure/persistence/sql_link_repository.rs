//! Backend-agnostic link repository on top of a [`Store`].

use async_trait::async_trait;
use std::sync::Arc;

use super::store::Store;
use super::value::Record;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, alias, url, clicks, created_at";

/// Link storage over any [`Store`].
///
/// All statements use the `$N` placeholder dialect; the store adapts them to
/// its backend.
pub struct SqlLinkRepository {
    store: Arc<dyn Store>,
}

impl SqlLinkRepository {
    /// Creates a new repository over a shared store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

fn link_from_record(record: &Record) -> Result<Link, AppError> {
    Ok(Link::new(
        record.get_i64("id")?,
        record.get_string("alias")?,
        record.get_string("url")?,
        record.get_i64("clicks")?,
        record.get_timestamp("created_at")?,
    ))
}

#[async_trait]
impl LinkRepository for SqlLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!("INSERT INTO links (alias, url) VALUES ($1, $2) RETURNING {LINK_COLUMNS}");
        let result = self
            .store
            .query(&sql, &[new_link.alias.into(), new_link.url.into()])
            .await?;

        let record = result
            .first()
            .ok_or_else(|| AppError::internal("Insert returned no row"))?;

        link_from_record(record)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE alias = $1");
        let result = self.store.query(&sql, &[alias.into()]).await?;

        result.first().map(link_from_record).transpose()
    }

    async fn list_recent(&self) -> Result<Vec<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC");
        let result = self.store.query(&sql, &[]).await?;

        result.rows.iter().map(link_from_record).collect()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = self
            .store
            .query("DELETE FROM links WHERE id = $1", &[id.into()])
            .await?;

        Ok(result.row_count > 0)
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        self.store
            .query(
                "UPDATE links SET clicks = clicks + 1 WHERE id = $1",
                &[id.into()],
            )
            .await?;

        Ok(())
    }
}
