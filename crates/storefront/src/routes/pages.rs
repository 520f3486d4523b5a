//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::views::{Layout, NavItem};

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

/// Unknown route template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
    pub path: String,
}

/// Display the about page.
#[instrument(skip(session))]
pub async fn about(session: Session) -> Result<AboutTemplate> {
    Ok(AboutTemplate {
        layout: Layout::load(&session, Some(NavItem::About)).await?,
    })
}

/// Fallback for routes that don't exist.
#[instrument(skip(session))]
pub async fn not_found(session: Session, uri: Uri) -> Result<Response> {
    tracing::debug!(path = %uri.path(), "No route matched");
    let layout = Layout::load(&session, None).await?;
    let page = NotFoundTemplate {
        layout,
        path: uri.path().to_owned(),
    };
    Ok((StatusCode::NOT_FOUND, page).into_response())
}
