//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;
use crate::views::{Layout, NavItem, ProductCardView};

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let layout = Layout::load(&session, Some(NavItem::Home)).await?;
    let products = state
        .catalog()
        .featured(FEATURED_COUNT)
        .iter()
        .map(ProductCardView::from)
        .collect();

    Ok(HomeTemplate { layout, products })
}
