//! Display data shared by every page template.

use tower_sessions::Session;

use customtee_core::{Product, Size};

use crate::error::Result;
use crate::models::{Notice, VisitorSession};

/// Top-level navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Products,
    Customize,
    About,
    Contact,
}

impl NavItem {
    const ALL: [Self; 5] = [
        Self::Home,
        Self::Products,
        Self::Customize,
        Self::About,
        Self::Contact,
    ];

    const fn href(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/produtos",
            Self::Customize => "/personalizar",
            Self::About => "/sobre",
            Self::Contact => "/contato",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Home => "Início",
            Self::Products => "Produtos",
            Self::Customize => "Personalizar",
            Self::About => "Sobre",
            Self::Contact => "Contato",
        }
    }
}

/// A navbar link.
#[derive(Debug, Clone)]
pub struct NavLinkView {
    pub href: &'static str,
    pub label: &'static str,
    pub highlight: bool,
    pub active: bool,
}

/// Data rendered by `base.html` around every page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub nav_links: Vec<NavLinkView>,
    /// Number of items in the cart badge.
    pub cart_count: u32,
    pub notice: Option<Notice>,
}

impl Layout {
    /// Build the layout for a page, consuming any queued flash notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(session: &Session, active: Option<NavItem>) -> Result<Self> {
        let visitor = VisitorSession::new(session);
        let cart_count = visitor.cart().await?.item_count();
        let notice = visitor.take_flash().await?;
        Ok(Self::new(active, cart_count, notice))
    }

    #[must_use]
    pub fn new(active: Option<NavItem>, cart_count: u32, notice: Option<Notice>) -> Self {
        let nav_links = NavItem::ALL
            .into_iter()
            .map(|item| NavLinkView {
                href: item.href(),
                label: item.label(),
                highlight: item == NavItem::Customize,
                active: Some(item) == active,
            })
            .collect();

        Self {
            nav_links,
            cart_count,
            notice,
        }
    }

    /// Replace the notice shown on this render.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Product card on listing pages.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub href: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub image_alt: String,
    pub category: &'static str,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            href: product
                .catalog_id()
                .map_or_else(|| "/personalizar".to_string(), |id| format!("/produto/{id}")),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            image_alt: format!("Camiseta {} - {}", product.name, product.description),
            category: product.category.label(),
        }
    }
}

/// A size button.
#[derive(Debug, Clone)]
pub struct SizeOptionView {
    pub label: &'static str,
    pub selected: bool,
}

impl SizeOptionView {
    #[must_use]
    pub fn new(size: Size, selected: Option<Size>) -> Self {
        Self {
            label: size.label(),
            selected: selected == Some(size),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use customtee_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_nav_marks_active_and_highlight() {
        let layout = Layout::new(Some(NavItem::Products), 3, None);
        assert_eq!(layout.nav_links.len(), 5);
        let active: Vec<&str> = layout
            .nav_links
            .iter()
            .filter(|l| l.active)
            .map(|l| l.href)
            .collect();
        assert_eq!(active, vec!["/produtos"]);
        let highlighted: Vec<&str> = layout
            .nav_links
            .iter()
            .filter(|l| l.highlight)
            .map(|l| l.label)
            .collect();
        assert_eq!(highlighted, vec!["Personalizar"]);
        assert_eq!(layout.cart_count, 3);
    }

    #[test]
    fn test_product_card() {
        let catalog = Catalog::builtin();
        let card = ProductCardView::from(catalog.get(ProductId::new(6)).unwrap());
        assert_eq!(card.href, "/produto/6");
        assert_eq!(card.price, "R$ 79,90");
        assert_eq!(card.category, "Básico");
        assert_eq!(
            card.image_alt,
            "Camiseta Minimal Essential - Simplicidade elegante para todos os momentos"
        );
    }
}
