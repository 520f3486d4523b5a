//! Shopping cart container.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s. Lines are identified by
//! their [`LineKey`] (product, size, color): adding an item whose key is
//! already present increases that line's quantity instead of appending a
//! duplicate. Quantities are always in `1..=MAX_LINE_QUANTITY`.
//!
//! ```
//! use customtee_core::{Cart, CartItem};
//! # use customtee_core::{Category, CurrencyCode, Price, Product, ProductId, ProductKey, Size};
//! # let product = Product {
//! #     key: ProductKey::Catalog(ProductId::new(1)),
//! #     name: "Urban Street Tee".to_string(),
//! #     description: String::new(),
//! #     full_description: String::new(),
//! #     price: Price::from_cents(8990, CurrencyCode::BRL),
//! #     image: String::new(),
//! #     category: Category::Street,
//! #     sizes: vec![Size::M],
//! #     colors: vec!["Preto".to_string()],
//! # };
//!
//! let mut cart = Cart::new();
//! cart.add(CartItem::new(product.clone(), 1, Size::M, "Preto")).unwrap();
//! cart.add(CartItem::new(product, 2, Size::M, "Preto")).unwrap();
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.total().display(), "R$ 269,70");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Product, ProductKey, Size};

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Errors returned by cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Items must be added with a positive quantity.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// The item is priced in a different currency than the cart.
    #[error("item is priced in {item} but the cart uses {cart}")]
    CurrencyMismatch {
        /// Currency of the cart.
        cart: &'static str,
        /// Currency of the rejected item.
        item: &'static str,
    },
}

/// Merge identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product: ProductKey,
    pub size: Size,
    pub color: String,
}

/// One line of the cart: a product snapshot with the chosen options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub size: Size,
    pub color: String,
}

impl CartItem {
    /// Create a cart item.
    #[must_use]
    pub fn new(product: Product, quantity: u32, size: Size, color: impl Into<String>) -> Self {
        Self {
            product,
            quantity,
            size,
            color: color.into(),
        }
    }

    /// The key this line merges on.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product: self.product.key,
            size: self.size,
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product.key == key.product && self.size == key.size && self.color == key.color
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// An ordered collection of cart lines with unique [`LineKey`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    currency: CurrencyCode,
    items: Vec<CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart priced in the default currency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_currency(CurrencyCode::default())
    }

    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub const fn with_currency(currency: CurrencyCode) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for `key`.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Add an item, merging it into an existing line with the same key.
    ///
    /// Returns the resulting quantity of the affected line, which is clamped
    /// to [`MAX_LINE_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a zero quantity and
    /// [`CartError::CurrencyMismatch`] if the product is priced in another
    /// currency than the cart.
    pub fn add(&mut self, item: CartItem) -> Result<u32, CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if item.product.price.currency_code != self.currency {
            return Err(CartError::CurrencyMismatch {
                cart: self.currency.code(),
                item: item.product.price.currency_code.code(),
            });
        }

        let key = item.key();
        if let Some(existing) = self.items.iter_mut().find(|line| line.matches(&key)) {
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_LINE_QUANTITY);
            return Ok(existing.quantity);
        }

        let mut item = item;
        item.quantity = item.quantity.min(MAX_LINE_QUANTITY);
        let quantity = item.quantity;
        self.items.push(item);
        Ok(quantity)
    }

    /// Remove the line for `key`. Returns true if a line was removed.
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(key));
        self.items.len() != before
    }

    /// Remove every line of `product`, whatever its size and color.
    ///
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product: ProductKey) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.product.key != product);
        before - self.items.len()
    }

    /// Set the quantity of the line for `key`.
    ///
    /// A quantity of zero removes the line; other values are clamped to
    /// [`MAX_LINE_QUANTITY`]. Returns the new quantity, or `None` if no line
    /// matched.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> Option<u32> {
        if quantity == 0 {
            return self.remove_line(key).then_some(0);
        }
        let line = self.items.iter_mut().find(|item| item.matches(key))?;
        line.quantity = quantity.min(MAX_LINE_QUANTITY);
        Some(line.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum::<Decimal>();
        Price::new(amount, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Category, DesignId, ProductId};

    fn tee(id: u32, cents: i64) -> Product {
        Product {
            key: ProductKey::Catalog(ProductId::new(id)),
            name: format!("Tee {id}"),
            description: String::new(),
            full_description: String::new(),
            price: Price::from_cents(cents, CurrencyCode::BRL),
            image: String::new(),
            category: Category::Street,
            sizes: vec![Size::P, Size::M, Size::G],
            colors: vec!["Preto".to_string(), "Branco".to_string()],
        }
    }

    #[test]
    fn test_same_triple_merges() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        let qty = cart
            .add(CartItem::new(tee(1, 8990), 2, Size::M, "Preto"))
            .unwrap();

        assert_eq!(qty, 3);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_different_size_or_color_appends() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::G, "Preto"))
            .unwrap();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Branco"))
            .unwrap();

        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.items()[1].size, Size::G);
        assert_eq!(cart.items()[2].color, "Branco");
    }

    #[test]
    fn test_custom_designs_never_merge() {
        let mut custom = tee(0, 12990);
        custom.key = ProductKey::Custom(DesignId::generate());
        let mut other = custom.clone();
        other.key = ProductKey::Custom(DesignId::generate());

        let mut cart = Cart::new();
        cart.add(CartItem::new(custom, 1, Size::M, "Preto")).unwrap();
        cart.add(CartItem::new(other, 1, Size::M, "Preto")).unwrap();
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new();
        let err = cart
            .add(CartItem::new(tee(1, 8990), 0, Size::M, "Preto"))
            .unwrap_err();
        assert_eq!(err, CartError::ZeroQuantity);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut product = tee(1, 8990);
        product.price = Price::from_cents(1999, CurrencyCode::USD);
        let mut cart = Cart::new();
        let err = cart
            .add(CartItem::new(product, 1, Size::M, "Preto"))
            .unwrap_err();
        assert!(matches!(err, CartError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_quantity_is_clamped() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 98, Size::M, "Preto"))
            .unwrap();
        let qty = cart
            .add(CartItem::new(tee(1, 8990), 5, Size::M, "Preto"))
            .unwrap();
        assert_eq!(qty, MAX_LINE_QUANTITY);

        let qty = cart
            .add(CartItem::new(tee(2, 8990), u32::MAX, Size::M, "Preto"))
            .unwrap();
        assert_eq!(qty, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Price::zero(CurrencyCode::BRL));

        cart.add(CartItem::new(tee(1, 8990), 2, Size::M, "Preto"))
            .unwrap();
        cart.add(CartItem::new(tee(2, 10990), 1, Size::P, "Branco"))
            .unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_cents(28970, CurrencyCode::BRL));
    }

    #[test]
    fn test_remove_line_only_removes_that_triple() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::G, "Preto"))
            .unwrap();

        let key = cart.items()[0].key();
        assert!(cart.remove_line(&key));
        assert!(!cart.remove_line(&key));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].size, Size::G);
    }

    #[test]
    fn test_remove_product_removes_all_variants() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::G, "Branco"))
            .unwrap();
        cart.add(CartItem::new(tee(2, 8990), 1, Size::G, "Branco"))
            .unwrap();

        let removed = cart.remove_product(ProductKey::Catalog(ProductId::new(1)));
        assert_eq!(removed, 2);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        let key = cart.items()[0].key();

        assert_eq!(cart.set_quantity(&key, 4), Some(4));
        assert_eq!(cart.line(&key).unwrap().quantity, 4);
        assert_eq!(cart.set_quantity(&key, 500), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.set_quantity(&key, 0), Some(0));
        assert!(cart.is_empty());
        assert_eq!(cart.set_quantity(&key, 2), None);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 1, Size::M, "Preto"))
            .unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serde_round_trip_keeps_lines() {
        let mut cart = Cart::new();
        cart.add(CartItem::new(tee(1, 8990), 2, Size::M, "Preto"))
            .unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
