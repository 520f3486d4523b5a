//! Cart route handlers.
//!
//! The cart is reviewed on the checkout page; these handlers edit its lines
//! and send the customer back there.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use customtee_core::{LineKey, ProductKey, Size};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::forms::lenient_u32;
use crate::models::VisitorSession;

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Identifies a cart line.
///
/// Without `size` and `color` the form addresses every line of the product.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<String>,
}

/// What a [`LineForm`] points at.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    Line(LineKey),
    Product(ProductKey),
}

impl LineForm {
    fn target(&self) -> Result<Target> {
        let product: ProductKey = self
            .product
            .parse()
            .map_err(|_| AppError::BadRequest(format!("unknown product key {}", self.product)))?;

        let size = self.size.as_deref().filter(|s| !s.is_empty());
        let color = self.color.as_deref().filter(|c| !c.is_empty());
        match (size, color) {
            (None, None) => Ok(Target::Product(product)),
            (Some(size), Some(color)) => {
                let size: Size = size
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("unknown size {size}")))?;
                Ok(Target::Line(LineKey {
                    product,
                    size,
                    color: color.to_owned(),
                }))
            }
            _ => Err(AppError::BadRequest(
                "size and color must be sent together".to_string(),
            )),
        }
    }
}

/// Remove a cart line, or every line of a product.
///
/// The checkout trash button posts the line's size and color, so it removes
/// that one variant and leaves other sizes or colors of the same product in
/// the cart. Posting only `product` removes every variant.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<LineForm>) -> Result<Redirect> {
    let target = form.target()?;
    let visitor = VisitorSession::new(&session);
    let mut cart = visitor.cart().await?;

    let removed = match &target {
        Target::Line(key) => usize::from(cart.remove_line(key)),
        Target::Product(product) => cart.remove_product(*product),
    };
    if removed > 0 {
        visitor.save_cart(&cart).await?;
        add_breadcrumb("cart", "Removed item", Some(&[("product", form.product.as_str())]));
    }
    tracing::info!(product = %form.product, removed, "Removed from cart");

    Ok(Redirect::to("/checkout"))
}

/// Set the quantity of a cart line. Zero removes it.
#[instrument(skip(session))]
pub async fn quantity(session: Session, Form(form): Form<LineForm>) -> Result<Redirect> {
    let Target::Line(key) = form.target()? else {
        return Err(AppError::BadRequest(
            "quantity updates need a size and color".to_string(),
        ));
    };
    let visitor = VisitorSession::new(&session);
    let mut cart = visitor.cart().await?;

    let current = cart.line(&key).map_or(0, |line| line.quantity);
    let requested = lenient_u32(form.quantity.as_deref(), current);
    if let Some(updated) = cart.set_quantity(&key, requested) {
        visitor.save_cart(&cart).await?;
        tracing::info!(product = %key.product, quantity = updated, "Updated cart line");
    }

    Ok(Redirect::to("/checkout"))
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = VisitorSession::new(&session).cart().await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}
