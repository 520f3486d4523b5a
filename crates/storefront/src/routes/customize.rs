//! Custom shirt designer route handlers.
//!
//! The draft lives in the session and every form posts back to the server,
//! which redirects to `GET /personalizar` to render the updated preview.
//! Uploaded photos are kept once per session and served back from
//! `GET /personalizar/arte/{id}`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use customtee_core::{CurrencyCode, DesignId, Price, Size};

use crate::customizer::{
    CUSTOM_SHIRT_PRICE_CENTS, CustomizationDraft, MAX_SCALE, MIN_SCALE, PALETTE,
    SHIRT_COLLAR_PATH, SHIRT_OUTLINE_PATH, UploadError, UploadedImage, accept_upload,
    artwork_url,
};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::forms::lenient_u32;
use crate::models::{Notice, VisitorSession};
use crate::views::{Layout, NavItem, SizeOptionView};

/// Multipart field carrying the photo.
pub const UPLOAD_FIELD: &str = "imagem";

/// The uploaded photo drawn on the shirt.
#[derive(Debug, Clone)]
pub struct PreviewImageView {
    pub href: String,
    pub x: String,
    pub y: String,
    pub side: String,
}

/// SVG preview of the shirt.
#[derive(Debug, Clone)]
pub struct PreviewView {
    pub outline_path: &'static str,
    pub collar_path: &'static str,
    pub fill: &'static str,
    pub outline_stroke: &'static str,
    pub collar_stroke: &'static str,
    pub placeholder_stroke: &'static str,
    pub placeholder_text_fill: &'static str,
    pub image: Option<PreviewImageView>,
}

impl PreviewView {
    fn new(draft: &CustomizationDraft) -> Self {
        let color = draft.shirt_color();
        let image = draft.artwork.map(|id| {
            let placement = draft.placement();
            PreviewImageView {
                href: artwork_url(id),
                x: format!("{:.1}", placement.x),
                y: format!("{:.1}", placement.y),
                side: format!("{:.1}", placement.side),
            }
        });

        Self {
            outline_path: SHIRT_OUTLINE_PATH,
            collar_path: SHIRT_COLLAR_PATH,
            fill: color.hex,
            outline_stroke: color.outline_stroke(),
            collar_stroke: color.collar_stroke(),
            placeholder_stroke: color.placeholder_stroke(),
            placeholder_text_fill: color.placeholder_text_fill(),
            image,
        }
    }
}

/// A shirt color swatch.
#[derive(Debug, Clone)]
pub struct SwatchView {
    pub name: &'static str,
    /// CSS class carrying the swatch background.
    pub class: String,
    pub selected: bool,
}

/// Customization page template.
#[derive(Template, WebTemplate)]
#[template(path = "customize/show.html")]
pub struct CustomizeTemplate {
    pub layout: Layout,
    pub preview: PreviewView,
    pub has_image: bool,
    pub swatches: Vec<SwatchView>,
    pub color_name: &'static str,
    pub sizes: Vec<SizeOptionView>,
    pub scale: u8,
    pub min_scale: u8,
    pub max_scale: u8,
    pub position_x: u8,
    pub position_y: u8,
    pub price: String,
}

impl CustomizeTemplate {
    fn new(layout: Layout, draft: &CustomizationDraft) -> Self {
        let color = draft.shirt_color();
        Self {
            layout,
            preview: PreviewView::new(draft),
            has_image: draft.artwork.is_some(),
            swatches: PALETTE
                .iter()
                .map(|c| SwatchView {
                    name: c.name,
                    class: format!("swatch-{}", c.name.to_lowercase()),
                    selected: c.name == color.name,
                })
                .collect(),
            color_name: color.name,
            sizes: Size::ALL
                .into_iter()
                .map(|size| SizeOptionView::new(size, draft.size))
                .collect(),
            scale: draft.scale,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            position_x: draft.position.x,
            position_y: draft.position.y,
            price: Price::from_cents(CUSTOM_SHIRT_PRICE_CENTS, CurrencyCode::BRL).display(),
        }
    }
}

/// Color, size and placement choices.
///
/// Missing or malformed fields leave the current value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct AdjustForm {
    pub color: Option<String>,
    pub size: Option<String>,
    pub scale: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl AdjustForm {
    fn apply(&self, draft: &mut CustomizationDraft) {
        if let Some(color) = self.color.as_deref() {
            draft.set_color(color);
        }
        if let Some(size) = self.size.as_deref().and_then(|s| s.parse::<Size>().ok()) {
            draft.size = Some(size);
        }
        draft.set_scale(lenient_u32(self.scale.as_deref(), u32::from(draft.scale)));
        draft.set_position(
            lenient_u32(self.x.as_deref(), u32::from(draft.position.x)),
            lenient_u32(self.y.as_deref(), u32::from(draft.position.y)),
        );
    }
}

const fn upload_status(error: UploadError) -> StatusCode {
    match error {
        UploadError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::NotAnImage => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        UploadError::Empty | UploadError::TooManyImages => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn multipart_error(error: &MultipartError) -> AppError {
    AppError::BadRequest(format!("malformed upload: {}", error.body_text()))
}

async fn render(
    session: &Session,
    draft: &CustomizationDraft,
    notice: Option<Notice>,
    status: StatusCode,
) -> Result<Response> {
    let mut layout = Layout::load(session, Some(NavItem::Customize)).await?;
    if let Some(notice) = notice {
        layout = layout.with_notice(notice);
    }
    Ok((status, CustomizeTemplate::new(layout, draft)).into_response())
}

/// Read the photo field from the multipart body.
///
/// Returns `Ok(Err(_))` for uploads the customer should be told about and
/// `Err(_)` for bodies that are not a usable multipart form.
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<std::result::Result<UploadedImage, UploadError>> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(Err(UploadError::Empty)),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Ok(Err(UploadError::TooLarge));
            }
            Err(e) => return Err(multipart_error(&e)),
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        return match field.bytes().await {
            Ok(bytes) => Ok(accept_upload(content_type.as_deref(), &bytes)),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Ok(Err(UploadError::TooLarge))
            }
            Err(e) => Err(multipart_error(&e)),
        };
    }
}

/// Display the customization page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let draft = VisitorSession::new(&session).draft().await?;
    render(&session, &draft, None, StatusCode::OK).await
}

/// Accept a photo upload.
///
/// The photo replaces the draft's current one. Images no longer used by the
/// draft or by a cart line are dropped before the new one is stored.
#[instrument(skip(session, multipart))]
pub async fn upload(session: Session, mut multipart: Multipart) -> Result<Response> {
    let visitor = VisitorSession::new(&session);
    let mut draft = visitor.draft().await?;

    let stored = match read_upload(&mut multipart).await? {
        Ok(image) => {
            let encoded_len = image.data_base64.len();
            let content_type = image.content_type.clone();
            let cart = visitor.cart().await?;
            let mut artwork = visitor.artwork().await?;
            let pruned = artwork.retain_referenced(None, &cart);
            artwork.insert(image).map(|id| {
                tracing::info!(%id, %content_type, encoded_len, pruned, "Design image uploaded");
                (id, artwork)
            })
        }
        Err(error) => Err(error),
    };

    match stored {
        Ok((id, artwork)) => {
            visitor.save_artwork(&artwork).await?;
            draft.artwork = Some(id);
            visitor.save_draft(&draft).await?;
            Ok(Redirect::to("/personalizar").into_response())
        }
        Err(error) => {
            tracing::debug!(%error, "Upload refused");
            let notice = Notice::error(error.title(), error.description());
            render(&session, &draft, Some(notice), upload_status(error)).await
        }
    }
}

/// Serve an uploaded photo to the visitor who sent it.
#[instrument(skip(session))]
pub async fn artwork(session: Session, Path(id): Path<String>) -> Result<Response> {
    let not_found = || AppError::NotFound(format!("artwork {id}"));
    let design_id: DesignId = id.parse().map_err(|_| not_found())?;
    let store = VisitorSession::new(&session).artwork().await?;
    let image = store.get(design_id).ok_or_else(not_found)?;
    let bytes = image
        .bytes()
        .map_err(|e| AppError::Internal(format!("stored artwork {design_id}: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.clone()),
            (header::CACHE_CONTROL, "private, max-age=3600".to_owned()),
        ],
        bytes,
    )
        .into_response())
}

/// Update color, size, scale and position.
#[instrument(skip(session, form))]
pub async fn adjust(session: Session, Form(form): Form<AdjustForm>) -> Result<Redirect> {
    let visitor = VisitorSession::new(&session);
    let mut draft = visitor.draft().await?;
    form.apply(&mut draft);
    visitor.save_draft(&draft).await?;
    Ok(Redirect::to("/personalizar"))
}

/// Restore the default scale and position.
#[instrument(skip(session))]
pub async fn reset(session: Session) -> Result<Redirect> {
    let visitor = VisitorSession::new(&session);
    let mut draft = visitor.draft().await?;
    draft.reset_placement();
    visitor.save_draft(&draft).await?;
    Ok(Redirect::to("/personalizar"))
}

/// Drop the uploaded photo.
#[instrument(skip(session))]
pub async fn remove(session: Session) -> Result<Redirect> {
    let visitor = VisitorSession::new(&session);
    let mut draft = visitor.draft().await?;
    if draft.remove_image().is_some() {
        visitor.save_draft(&draft).await?;
        let cart = visitor.cart().await?;
        let mut artwork = visitor.artwork().await?;
        if artwork.retain_referenced(None, &cart) > 0 {
            visitor.save_artwork(&artwork).await?;
        }
    }
    Ok(Redirect::to("/personalizar"))
}

/// Add the designed shirt to the cart and go to checkout.
///
/// The posted choices are applied first, so the form's add button and its
/// update button see the same state. They are only kept when the shirt is
/// added; a refused add leaves the saved draft as it was.
#[instrument(skip(session, form))]
pub async fn add_to_cart(session: Session, Form(form): Form<AdjustForm>) -> Result<Response> {
    let visitor = VisitorSession::new(&session);
    let mut draft = visitor.draft().await?;
    form.apply(&mut draft);

    let item = match draft.to_cart_item() {
        Ok(item) => item,
        Err(error) => {
            let notice = Notice::error(error.title(), error.description());
            return render(&session, &draft, Some(notice), StatusCode::UNPROCESSABLE_ENTITY).await;
        }
    };

    let product_key = item.product.key.to_string();
    let mut cart = visitor.cart().await?;
    cart.add(item)?;
    visitor.save_cart(&cart).await?;
    visitor.save_draft(&draft).await?;

    add_breadcrumb(
        "cart",
        "Added custom design",
        Some(&[("product", product_key.as_str())]),
    );
    tracing::info!(product = %product_key, color = %draft.color, "Custom shirt added to cart");

    visitor
        .flash(&Notice::success(
            "Adicionado ao carrinho!",
            "Sua camiseta personalizada foi adicionada ao carrinho.",
        ))
        .await?;
    Ok(Redirect::to("/checkout").into_response())
}
