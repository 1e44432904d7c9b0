//! Admin page: link list, creation and deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, header::HOST},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::notice::Notice;

/// Host shown in short URLs when the request carries no usable `Host` header.
const FALLBACK_HOST: &str = "localhost";

/// One row of the links table.
pub struct LinkView {
    pub id: i64,
    pub alias: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: String,
    pub short_url: String,
}

impl LinkView {
    fn from_link(link: Link, host: &str) -> Self {
        Self {
            short_url: link.short_url(host),
            created_at: link.created_at.format("%Y-%m-%d %H:%M").to_string(),
            id: link.id,
            alias: link.alias,
            url: link.url,
            clicks: link.clicks,
        }
    }
}

/// Template for the admin page.
///
/// Renders `templates/admin.html` with:
/// - Link creation form
/// - Links table, most recent first
/// - Optional outcome banner
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub links: Vec<LinkView>,
    pub host: String,
    pub total_clicks: i64,
    pub notice_message: Option<&'static str>,
    pub notice_is_error: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub notice: Option<String>,
}

/// Form submitted by the create-link form.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkForm {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,

    /// Blank means "generate one".
    #[serde(default)]
    #[validate(length(max = 64, message = "Alias is too long"))]
    pub alias: String,
}

fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .unwrap_or(FALLBACK_HOST)
        .to_string()
}

/// Renders the admin page.
///
/// # Endpoint
///
/// `GET /admin`
///
/// # Errors
///
/// Returns 500 with a plain-text message if the links cannot be read.
pub async fn admin_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let host = request_host(&headers);
    let links = state.link_service.list_links().await?;

    let total_clicks = links.iter().map(|link| link.clicks).sum();
    let notice = query.notice.as_deref().and_then(Notice::from_code);

    Ok(AdminTemplate {
        links: links
            .into_iter()
            .map(|link| LinkView::from_link(link, &host))
            .collect(),
        host,
        total_clicks,
        notice_message: notice.map(Notice::message),
        notice_is_error: notice.is_some_and(Notice::is_error),
    })
}

/// Creates a link from the admin form.
///
/// # Endpoint
///
/// `POST /admin/create`
///
/// Always redirects back to `/admin`; the outcome is reported through the
/// `notice` query parameter and failures are logged.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateLinkForm>,
) -> Redirect {
    if form.url.trim().is_empty() {
        return Redirect::to(&Notice::MissingUrl.admin_location());
    }

    if let Err(e) = form.validate() {
        tracing::warn!(error = %e, "Rejected link form");
        return Redirect::to(&Notice::Invalid.admin_location());
    }

    let notice = match state
        .link_service
        .create_link(&form.url, Some(&form.alias))
        .await
    {
        Ok(link) => {
            tracing::info!(id = link.id, alias = %link.alias, "Link created");
            Notice::Created
        }
        Err(AppError::Validation { message }) => {
            tracing::warn!(%message, "Rejected link form");
            Notice::Invalid
        }
        Err(AppError::Conflict { message }) => {
            tracing::warn!(alias = %form.alias, %message, "Alias already taken");
            Notice::DuplicateAlias
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create link");
            Notice::Failed
        }
    };

    Redirect::to(&notice.admin_location())
}

/// Deletes a link by id.
///
/// # Endpoint
///
/// `POST /admin/delete/{id}`
///
/// Unknown or non-numeric ids are a no-op. Always redirects back to `/admin`.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    let Ok(id) = id.parse::<i64>() else {
        tracing::warn!(%id, "Ignoring delete with non-numeric id");
        return Redirect::to(&Notice::NotFound.admin_location());
    };

    let notice = match state.link_service.delete_link(id).await {
        Ok(true) => {
            tracing::info!(id, "Link deleted");
            Notice::Deleted
        }
        Ok(false) => Notice::NotFound,
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to delete link");
            Notice::Failed
        }
    };

    Redirect::to(&notice.admin_location())
}
