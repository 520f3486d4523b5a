//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use customtee_core::{CartItem, Category, MAX_LINE_QUANTITY, Product, ProductId, Size};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::forms::lenient_u32;
use crate::models::{Notice, VisitorSession};
use crate::state::AppState;
use crate::views::{Layout, NavItem, ProductCardView, SizeOptionView};

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub categoria: Option<String>,
}

/// A category filter button.
#[derive(Debug, Clone)]
pub struct CategoryButtonView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryButtonView>,
    pub products: Vec<ProductCardView>,
}

/// A color choice on the product page.
#[derive(Debug, Clone)]
pub struct ColorOptionView {
    pub name: String,
    pub selected: bool,
}

/// Product detail display data.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub full_description: String,
    pub form_action: String,
    pub sizes: Vec<SizeOptionView>,
    pub colors: Vec<ColorOptionView>,
    pub quantity: u32,
}

impl ProductDetailView {
    fn new(product: &Product, selection: &Selection) -> Self {
        let card = ProductCardView::from(product);
        Self {
            form_action: format!("{}/carrinho", card.href),
            card,
            full_description: product.full_description.clone(),
            sizes: product
                .sizes
                .iter()
                .map(|size| SizeOptionView::new(*size, selection.size))
                .collect(),
            colors: product
                .colors
                .iter()
                .map(|color| ColorOptionView {
                    name: color.clone(),
                    selected: selection.color.as_deref() == Some(color.as_str()),
                })
                .collect(),
            quantity: selection.quantity,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductDetailView,
}

/// Shown when a product ID does not resolve.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub layout: Layout,
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<String>,
    /// `buy` sends the customer straight to checkout.
    pub action: Option<String>,
}

/// What the customer picked on the product page.
#[derive(Debug, Clone, Default)]
struct Selection {
    size: Option<Size>,
    color: Option<String>,
    quantity: u32,
}

impl Selection {
    /// Parse the form against the product's options.
    ///
    /// Sizes and colors the product doesn't offer are treated as unselected.
    fn from_form(product: &Product, form: &AddToCartForm) -> Self {
        let size = form
            .size
            .as_deref()
            .and_then(|s| s.parse::<Size>().ok())
            .filter(|s| product.offers_size(*s));
        let color = form
            .color
            .as_deref()
            .filter(|c| product.offers_color(c))
            .map(str::to_owned);
        let quantity = lenient_u32(form.quantity.as_deref(), 1).clamp(1, MAX_LINE_QUANTITY);

        Self {
            size,
            color,
            quantity,
        }
    }

    /// The chosen size and color, or the notice to show when either is
    /// missing. Size is checked first.
    fn validate(&self) -> std::result::Result<(Size, &str), Notice> {
        let size = self.size.ok_or_else(|| {
            Notice::error(
                "Selecione um tamanho",
                "Por favor, escolha um tamanho antes de adicionar ao carrinho.",
            )
        })?;
        let color = self.color.as_deref().ok_or_else(|| {
            Notice::error(
                "Selecione uma cor",
                "Por favor, escolha uma cor antes de adicionar ao carrinho.",
            )
        })?;
        Ok((size, color))
    }
}

fn category_buttons(active: Option<&str>) -> Vec<CategoryButtonView> {
    let all = CategoryButtonView {
        label: "Todos",
        href: "/produtos".to_string(),
        active: active.is_none(),
    };

    std::iter::once(all)
        .chain(Category::FILTERABLE.iter().map(|category| CategoryButtonView {
            label: category.label(),
            href: format!("/produtos?categoria={}", category.slug()),
            active: active == Some(category.slug()),
        }))
        .collect()
}

/// Look up a product from a raw path segment.
fn find_product<'a>(state: &'a AppState, raw_id: &str) -> Option<&'a Product> {
    let id = raw_id.parse::<ProductId>().ok()?;
    state.catalog().get(id)
}

async fn not_found(session: &Session) -> Result<Response> {
    let layout = Layout::load(session, Some(NavItem::Products)).await?;
    Ok((StatusCode::NOT_FOUND, ProductNotFoundTemplate { layout }).into_response())
}

/// Display the product listing, optionally filtered by category.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> Result<ProductsIndexTemplate> {
    let layout = Layout::load(&session, Some(NavItem::Products)).await?;

    let slug = query.categoria.as_deref().filter(|s| !s.is_empty());
    let catalog = state.catalog();
    let products = match slug {
        None => catalog.all().iter().map(ProductCardView::from).collect(),
        Some(slug) => Category::from_slug(slug)
            .map(|category| {
                catalog
                    .in_category(category)
                    .map(ProductCardView::from)
                    .collect()
            })
            .unwrap_or_default(),
    };

    Ok(ProductsIndexTemplate {
        layout,
        categories: category_buttons(slug),
        products,
    })
}

/// Display a product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let Some(product) = find_product(&state, &id) else {
        return not_found(&session).await;
    };

    let layout = Layout::load(&session, Some(NavItem::Products)).await?;
    let selection = Selection {
        quantity: 1,
        ..Selection::default()
    };

    Ok(ProductShowTemplate {
        layout,
        product: ProductDetailView::new(product, &selection),
    }
    .into_response())
}

/// Add a catalog product to the cart.
///
/// Redirects back to the product page, or to checkout when the customer chose
/// to buy now. An incomplete selection re-renders the page with the choices
/// kept.
#[instrument(skip(state, session, form))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let Some(product) = find_product(&state, &id) else {
        return not_found(&session).await;
    };

    let selection = Selection::from_form(product, &form);
    let (size, color) = match selection.validate() {
        Ok(choice) => choice,
        Err(notice) => {
            let layout = Layout::load(&session, Some(NavItem::Products))
                .await?
                .with_notice(notice);
            let page = ProductShowTemplate {
                layout,
                product: ProductDetailView::new(product, &selection),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let visitor = VisitorSession::new(&session);
    let mut cart = visitor.cart().await?;
    let line_quantity = cart.add(CartItem::new(
        product.clone(),
        selection.quantity,
        size,
        color,
    ))?;
    visitor.save_cart(&cart).await?;

    let product_key = product.key.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product", product_key.as_str()), ("size", size.label())]),
    );
    tracing::info!(
        product = %product.key,
        size = %size,
        color = %color,
        line_quantity,
        "Added to cart"
    );

    visitor
        .flash(&Notice::success(
            "Adicionado ao carrinho!",
            format!("{} foi adicionado ao seu carrinho.", product.name),
        ))
        .await?;

    let target = if form.action.as_deref() == Some("buy") {
        "/checkout".to_string()
    } else {
        format!("/produto/{id}")
    };
    Ok(Redirect::to(&target).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn form(size: Option<&str>, color: Option<&str>, quantity: Option<&str>) -> AddToCartForm {
        AddToCartForm {
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
            quantity: quantity.map(str::to_owned),
            action: None,
        }
    }

    #[test]
    fn test_selection_requires_size_before_color() {
        let catalog = Catalog::builtin();
        let product = catalog.get(ProductId::new(1)).unwrap();

        let missing = Selection::from_form(product, &form(None, Some("Preto"), None))
            .validate()
            .unwrap_err();
        assert_eq!(missing.title, "Selecione um tamanho");

        let missing = Selection::from_form(product, &form(Some("M"), None, None))
            .validate()
            .unwrap_err();
        assert_eq!(missing.title, "Selecione uma cor");

        let selection = Selection::from_form(product, &form(Some("M"), Some("Preto"), None));
        assert_eq!(selection.validate().unwrap(), (Size::M, "Preto"));
    }

    #[test]
    fn test_selection_rejects_options_the_product_lacks() {
        let catalog = Catalog::builtin();
        // Urban Street Tee has no XG and no Azul
        let product = catalog.get(ProductId::new(1)).unwrap();
        let selection = Selection::from_form(product, &form(Some("XG"), Some("Azul"), None));
        assert_eq!(selection.size, None);
        assert_eq!(selection.color, None);
    }

    #[test]
    fn test_selection_quantity_is_lenient() {
        let catalog = Catalog::builtin();
        let product = catalog.get(ProductId::new(1)).unwrap();
        let quantity = |q: Option<&str>| Selection::from_form(product, &form(None, None, q)).quantity;

        assert_eq!(quantity(None), 1);
        assert_eq!(quantity(Some("abc")), 1);
        assert_eq!(quantity(Some("0")), 1);
        assert_eq!(quantity(Some("4")), 4);
        assert_eq!(quantity(Some("500")), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_category_buttons() {
        let buttons = category_buttons(None);
        let labels: Vec<&str> = buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Todos", "Street", "Arte", "Retro", "Eco", "Básico"]);
        assert!(buttons.first().unwrap().active);

        let buttons = category_buttons(Some("arte"));
        let active: Vec<&str> = buttons.iter().filter(|b| b.active).map(|b| b.label).collect();
        assert_eq!(active, vec!["Arte"]);
    }

    #[test]
    fn test_detail_view_marks_selection() {
        let catalog = Catalog::builtin();
        let product = catalog.get(ProductId::new(6)).unwrap();
        let selection = Selection::from_form(product, &form(Some("pp"), Some("Marinho"), Some("2")));
        let view = ProductDetailView::new(product, &selection);

        assert_eq!(view.form_action, "/produto/6/carrinho");
        assert_eq!(view.quantity, 2);
        let sizes: Vec<&str> = view.sizes.iter().filter(|s| s.selected).map(|s| s.label).collect();
        assert_eq!(sizes, vec!["PP"]);
        let colors: Vec<&str> = view
            .colors
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(colors, vec!["Marinho"]);
    }
}
