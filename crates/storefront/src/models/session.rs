//! Session-related types.
//!
//! Everything a visitor accumulates while browsing (cart, customization
//! draft, uploaded images, flash notice, last order) is stored in their
//! session and read back on the next request.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use customtee_core::Cart;

use crate::customizer::{ArtworkStore, CustomizationDraft};
use crate::error::Result;

/// Session keys for visitor data.
pub mod keys {
    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the customization draft.
    pub const CUSTOMIZATION: &str = "customization";

    /// Key for the uploaded images.
    pub const ARTWORK: &str = "artwork";

    /// Key for the one-shot notice shown on the next page.
    pub const FLASH: &str = "flash";

    /// Key for the most recent order confirmation.
    pub const LAST_ORDER: &str = "last_order";
}

/// Visual style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A titled message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// A success notice.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    /// An error notice.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns true for error notices.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}

/// Summary of a placed order, shown on the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Short reference quoted to the customer.
    pub reference: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub cep: String,
    pub payment_label: String,
    /// Final total, already formatted.
    pub total: String,
}

/// Typed access to the visitor's session data.
///
/// Reads fall back to defaults when the key is absent; every mutation must
/// be written back with the matching `save_*` call.
pub struct VisitorSession<'a> {
    session: &'a Session,
}

impl<'a> VisitorSession<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the cart (empty if none).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn cart(&self) -> Result<Cart> {
        Ok(self.session.get::<Cart>(keys::CART).await?.unwrap_or_default())
    }

    /// Store the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_cart(&self, cart: &Cart) -> Result<()> {
        self.session.insert(keys::CART, cart).await?;
        Ok(())
    }

    /// Load the customization draft (default if none).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn draft(&self) -> Result<CustomizationDraft> {
        Ok(self
            .session
            .get::<CustomizationDraft>(keys::CUSTOMIZATION)
            .await?
            .unwrap_or_default())
    }

    /// Store the customization draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_draft(&self, draft: &CustomizationDraft) -> Result<()> {
        self.session.insert(keys::CUSTOMIZATION, draft).await?;
        Ok(())
    }

    /// Load the uploaded images (empty if none).
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn artwork(&self) -> Result<ArtworkStore> {
        Ok(self
            .session
            .get::<ArtworkStore>(keys::ARTWORK)
            .await?
            .unwrap_or_default())
    }

    /// Store the uploaded images.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_artwork(&self, artwork: &ArtworkStore) -> Result<()> {
        self.session.insert(keys::ARTWORK, artwork).await?;
        Ok(())
    }

    /// Queue a notice for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn flash(&self, notice: &Notice) -> Result<()> {
        self.session.insert(keys::FLASH, notice).await?;
        Ok(())
    }

    /// Take the queued notice, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn take_flash(&self) -> Result<Option<Notice>> {
        Ok(self.session.remove::<Notice>(keys::FLASH).await?)
    }

    /// Store the confirmation of a placed order.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_order(&self, order: &OrderConfirmation) -> Result<()> {
        self.session.insert(keys::LAST_ORDER, order).await?;
        Ok(())
    }

    /// Load the most recent order confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn last_order(&self) -> Result<Option<OrderConfirmation>> {
        Ok(self.session.get::<OrderConfirmation>(keys::LAST_ORDER).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use customtee_core::{
        CartItem, Category, CurrencyCode, Price, Product, ProductId, ProductKey, Size,
    };

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn tee() -> Product {
        Product {
            key: ProductKey::Catalog(ProductId::new(1)),
            name: "Urban Street Tee".to_string(),
            description: String::new(),
            full_description: String::new(),
            price: Price::from_cents(8990, CurrencyCode::BRL),
            image: "/static/images/products/urban-street-tee.svg".to_string(),
            category: Category::Street,
            sizes: vec![Size::M],
            colors: vec!["Preto".to_string()],
        }
    }

    #[tokio::test]
    async fn test_cart_defaults_to_empty() {
        let session = session();
        let visitor = VisitorSession::new(&session);
        assert!(visitor.cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_session() {
        let session = session();
        let visitor = VisitorSession::new(&session);

        let mut cart = visitor.cart().await.unwrap();
        cart.add(CartItem::new(tee(), 2, Size::M, "Preto")).unwrap();
        visitor.save_cart(&cart).await.unwrap();

        let reloaded = visitor.cart().await.unwrap();
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.total().display(), "R$ 179,80");
    }

    #[tokio::test]
    async fn test_flash_is_shown_once() {
        let session = session();
        let visitor = VisitorSession::new(&session);

        visitor
            .flash(&Notice::success("Adicionado ao carrinho!", "ok"))
            .await
            .unwrap();
        let notice = visitor.take_flash().await.unwrap().unwrap();
        assert_eq!(notice.title, "Adicionado ao carrinho!");
        assert!(!notice.is_error());
        assert!(visitor.take_flash().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_draft_defaults() {
        let session = session();
        let visitor = VisitorSession::new(&session);
        let draft = visitor.draft().await.unwrap();
        assert_eq!(draft, CustomizationDraft::default());
    }

    #[tokio::test]
    async fn test_artwork_round_trips_through_session() {
        let session = session();
        let visitor = VisitorSession::new(&session);
        assert!(visitor.artwork().await.unwrap().is_empty());

        let mut artwork = ArtworkStore::default();
        let image = crate::customizer::accept_upload(Some("image/gif"), b"GIF89a").unwrap();
        let id = artwork.insert(image.clone()).unwrap();
        visitor.save_artwork(&artwork).await.unwrap();

        let reloaded = visitor.artwork().await.unwrap();
        assert_eq!(reloaded.get(id), Some(&image));
    }
}
