//! Checkout route handlers.
//!
//! Orders are not sent anywhere: a valid submission stores a confirmation in
//! the session, empties the cart and shows the summary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use customtee_core::{Cart, CartItem, Price};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::forms;
use crate::models::{Notice, OrderConfirmation, VisitorSession};
use crate::views::Layout;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    Credit,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::Pix, Self::Credit, Self::Boleto];

    /// Form value.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::Credit => "credit",
            Self::Boleto => "boleto",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::Credit => "Cartão de Crédito",
            Self::Boleto => "Boleto",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pix => "10% de desconto",
            Self::Credit => "Em até 12x",
            Self::Boleto => "Vencimento em 3 dias",
        }
    }

    /// Percentage taken off the order total.
    #[must_use]
    pub const fn discount_percent(self) -> u32 {
        match self {
            Self::Pix => 10,
            Self::Credit | Self::Boleto => 0,
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

/// Order amounts for a cart and payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Price,
    pub discount: Price,
    pub total: Price,
}

impl Totals {
    #[must_use]
    pub fn new(cart: &Cart, payment: Option<PaymentMethod>) -> Self {
        let subtotal = cart.total();
        let discount = subtotal.percentage(payment.map_or(0, PaymentMethod::discount_percent));
        let total = subtotal.saturating_sub(&discount);
        Self {
            subtotal,
            discount,
            total,
        }
    }
}

/// A cart line on the checkout page.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_key: String,
    pub name: String,
    pub image: String,
    pub size: &'static str,
    pub color: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_key: item.product.key.to_string(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            size: item.size.label(),
            color: item.color.clone(),
            quantity: item.quantity,
            line_total: item.line_total().display(),
        }
    }
}

/// A payment method choice.
#[derive(Debug, Clone)]
pub struct PaymentOptionView {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

/// Checkout form data. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub cep: String,
    pub payment: String,
}

impl CheckoutForm {
    fn payment_method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_id(&self.payment)
    }

    fn validate(&self) -> FieldErrors {
        FieldErrors {
            name: forms::required(&self.name, "Nome é obrigatório"),
            email: forms::email(&self.email),
            address: forms::required(&self.address, "Endereço é obrigatório"),
            city: forms::required(&self.city, "Cidade é obrigatória"),
            cep: forms::required(&self.cep, "CEP é obrigatório"),
            payment: self
                .payment_method()
                .is_none()
                .then_some("Selecione uma forma de pagamento"),
        }
    }
}

/// Inline messages for the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub address: Option<&'static str>,
    pub city: Option<&'static str>,
    pub cep: Option<&'static str>,
    pub payment: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.cep.is_none()
            && self.payment.is_none()
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub discount: Option<String>,
    pub total: String,
    pub payments: Vec<PaymentOptionView>,
    pub form: CheckoutForm,
    pub errors: FieldErrors,
}

impl CheckoutTemplate {
    fn new(layout: Layout, cart: &Cart, form: CheckoutForm, errors: FieldErrors) -> Self {
        let payment = form.payment_method();
        let totals = Totals::new(cart, payment);
        Self {
            layout,
            lines: cart.items().iter().map(CartLineView::from).collect(),
            subtotal: totals.subtotal.display(),
            discount: (!totals.discount.is_zero()).then(|| totals.discount.display()),
            total: totals.total.display(),
            payments: PaymentMethod::ALL
                .into_iter()
                .map(|m| PaymentOptionView {
                    id: m.id(),
                    label: m.label(),
                    description: m.description(),
                    selected: Some(m) == payment,
                })
                .collect(),
            form,
            errors,
        }
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct ConfirmedTemplate {
    pub layout: Layout,
    pub order: OrderConfirmation,
}

/// Short order reference shown to the customer.
fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id.get(..8).unwrap_or(&id).to_ascii_uppercase()
}

/// Display the cart and checkout form.
///
/// Each line gets its own remove button posting the line's size and color,
/// so it drops that variant only (see [`super::cart::remove`]).
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CheckoutTemplate> {
    let layout = Layout::load(&session, None).await?;
    let cart = VisitorSession::new(&session).cart().await?;
    Ok(CheckoutTemplate::new(
        layout,
        &cart,
        CheckoutForm::default(),
        FieldErrors::default(),
    ))
}

/// Validate the checkout form and place the order.
#[instrument(skip(session, form))]
pub async fn submit(session: Session, Form(form): Form<CheckoutForm>) -> Result<Response> {
    let visitor = VisitorSession::new(&session);
    let mut cart = visitor.cart().await?;

    if cart.is_empty() {
        let layout = Layout::load(&session, None).await?.with_notice(Notice::error(
            "Carrinho vazio",
            "Adicione produtos ao carrinho antes de finalizar.",
        ));
        let page = CheckoutTemplate::new(layout, &cart, form, FieldErrors::default());
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let errors = form.validate();
    let Some(payment) = form.payment_method().filter(|_| errors.is_empty()) else {
        tracing::debug!(?errors, "Checkout form rejected");
        let layout = Layout::load(&session, None).await?.with_notice(Notice::error(
            "Campos obrigatórios",
            "Por favor, preencha todos os campos.",
        ));
        let page = CheckoutTemplate::new(layout, &cart, form, errors);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    };

    let totals = Totals::new(&cart, Some(payment));
    let order = OrderConfirmation {
        reference: order_reference(),
        name: form.name,
        email: form.email,
        address: form.address,
        city: form.city,
        cep: form.cep,
        payment_label: payment.label().to_owned(),
        total: totals.total.display(),
    };

    let item_count = cart.item_count();
    cart.clear();
    visitor.save_cart(&cart).await?;
    visitor.save_order(&order).await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("reference", order.reference.as_str()), ("payment", payment.id())]),
    );
    tracing::info!(
        reference = %order.reference,
        payment = payment.id(),
        items = item_count,
        total = %totals.total,
        "Order placed"
    );

    Ok(Redirect::to("/checkout/confirmado").into_response())
}

/// Display the last placed order.
#[instrument(skip(session))]
pub async fn confirmed(session: Session) -> Result<Response> {
    let Some(order) = VisitorSession::new(&session).last_order().await? else {
        return Ok(Redirect::to("/produtos").into_response());
    };
    let layout = Layout::load(&session, None).await?;
    Ok(ConfirmedTemplate { layout, order }.into_response())
}
