//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqlLinkRepository`] - PostgreSQL or SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its exact (case-sensitive) alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, most recently created first.
    async fn list_recent(&self) -> Result<Vec<Link>, AppError>;

    /// Deletes a link by id.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no link had that id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Adds one to the click counter of the link with `id`.
    ///
    /// The increment happens in a single `UPDATE` so concurrent calls never
    /// lose counts at the row level.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;
}
