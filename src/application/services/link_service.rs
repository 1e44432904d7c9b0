//! Link creation, resolution and click recording.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_alias, validate_custom_alias};
use crate::utils::url_normalizer::normalize_url;

/// Insert attempts for a generated alias before giving up.
const GENERATED_ALIAS_ATTEMPTS: usize = 3;

/// Service for creating, resolving and deleting links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + 'static> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a link from admin form input.
    ///
    /// The URL gets an `https://` prefix if it has no scheme. A blank
    /// `custom_alias` is treated as absent and a random alias is generated.
    ///
    /// # Collisions
    ///
    /// - Custom alias: a taken alias is reported as a conflict, never retried
    /// - Generated alias: the insert is retried with a fresh alias a few times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or unparseable,
    /// or the custom alias is invalid.
    /// Returns [`AppError::Conflict`] if the alias already exists.
    pub async fn create_link(
        &self,
        raw_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<Link, AppError> {
        let url = normalize_url(raw_url).map_err(AppError::bad_request)?;

        match custom_alias.map(str::trim).filter(|alias| !alias.is_empty()) {
            Some(alias) => {
                validate_custom_alias(alias)?;
                self.link_repository
                    .create(NewLink {
                        alias: alias.to_string(),
                        url,
                    })
                    .await
            }
            None => self.create_with_generated_alias(url).await,
        }
    }

    async fn create_with_generated_alias(&self, url: String) -> Result<Link, AppError> {
        let mut last_error = None;

        for _ in 0..GENERATED_ALIAS_ATTEMPTS {
            let new_link = NewLink {
                alias: generate_alias(),
                url: url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Err(AppError::Conflict { message }) => {
                    tracing::warn!("Generated alias collided, retrying");
                    last_error = Some(AppError::Conflict { message });
                }
                other => return other,
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::internal("Failed to generate alias")))
    }

    /// Looks up a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that alias.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, alias: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Increments the click counter of `link_id` in a detached task.
    ///
    /// The caller does not have to await the handle; a failed increment is
    /// logged and otherwise ignored.
    pub fn record_click(&self, link_id: i64) -> JoinHandle<()> {
        let repository = Arc::clone(&self.link_repository);

        tokio::spawn(async move {
            if let Err(e) = repository.increment_clicks(link_id).await {
                tracing::error!(link_id, error = %e, "Failed to record click");
            }
        })
    }

    /// Lists all links, most recent first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_recent().await
    }

    /// Deletes a link by id.
    ///
    /// Returns `Ok(false)` when no link had that id.
    pub async fn delete_link(&self, id: i64) -> Result<bool, AppError> {
        self.link_repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_link(id: i64, alias: &str, url: &str) -> Link {
        Link::new(id, alias.to_string(), url.to_string(), 0, Utc::now())
    }

    fn echo_link(new_link: NewLink) -> Result<Link, AppError> {
        Ok(Link::new(1, new_link.alias, new_link.url, 0, Utc::now()))
    }

    #[tokio::test]
    async fn test_create_link_with_custom_alias() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.alias == "docs" && new_link.url == "https://docs.rs")
            .times(1)
            .returning(echo_link);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("https://docs.rs", Some("docs"))
            .await
            .unwrap();

        assert_eq!(link.alias, "docs");
        assert_eq!(link.url, "https://docs.rs");
    }

    #[tokio::test]
    async fn test_create_link_prefixes_scheme() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.url == "https://example.com")
            .times(1)
            .returning(echo_link);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service.create_link("example.com", Some("ex")).await.unwrap();
        assert_eq!(link.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_link_generates_alias_when_blank() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.alias.len() == 6)
            .times(1)
            .returning(echo_link);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("https://example.com", Some("   "))
            .await
            .unwrap();
        assert_eq!(link.alias.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_empty_url_never_inserts() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("", None).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_alias_never_inserts() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_link("https://example.com", Some("admin"))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_custom_alias_conflict_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Alias already exists")));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_link("https://example.com", Some("taken"))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_generated_alias_retried_on_conflict() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_link_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Alias already exists")));
        mock_link_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(echo_link);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_generated_alias_gives_up() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(GENERATED_ALIAS_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Alias already exists")));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com", None).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_internal_error_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error: gone")));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com", None).await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        let link = create_test_link(4, "docs", "https://docs.rs");
        mock_link_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "docs")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service.resolve("docs").await.unwrap();
        assert_eq!(link.id, 4);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service.resolve("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Link not found");
    }

    #[tokio::test]
    async fn test_record_click_increments_in_background() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_increment_clicks()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|_| Ok(()));

        let service = LinkService::new(Arc::new(mock_link_repo));

        service.record_click(9).await.unwrap();
    }

    #[tokio::test]
    async fn test_record_click_failure_is_swallowed() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error: locked")));

        let service = LinkService::new(Arc::new(mock_link_repo));

        // The task completes normally; the error is only logged.
        assert!(service.record_click(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_passthrough() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_delete()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(mock_link_repo));

        assert!(!service.delete_link(3).await.unwrap());
    }
}
