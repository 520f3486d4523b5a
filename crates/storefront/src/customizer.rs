//! Shirt customization: the visitor's draft design and its preview geometry.
//!
//! A draft holds a reference to one uploaded image, a shirt color from a fixed
//! palette, an optional size and the image placement. The preview is an SVG
//! shirt outline (`viewBox 0 0 400 450`) with the image laid over the chest.
//!
//! Image bytes live once per session in an [`ArtworkStore`]; the draft and
//! custom cart lines only carry the artwork ID and its URL.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use customtee_core::{
    Cart, CartItem, Category, CurrencyCode, DesignId, Price, Product, ProductKey, Size,
};

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Price of a customized shirt, in centavos.
pub const CUSTOM_SHIRT_PRICE_CENTS: i64 = 12_990;

/// Distinct images a session may hold at once.
pub const MAX_STORED_ARTWORKS: usize = 3;

/// Path prefix under which stored images are served.
pub const ARTWORK_PATH_PREFIX: &str = "/personalizar/arte/";

/// Image content types accepted for upload.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

pub const MIN_SCALE: u8 = 20;
pub const MAX_SCALE: u8 = 80;
pub const DEFAULT_SCALE: u8 = 50;
pub const MAX_POSITION: u8 = 100;
pub const DEFAULT_POSITION: Position = Position { x: 50, y: 45 };

/// SVG path of the shirt outline.
pub const SHIRT_OUTLINE_PATH: &str = "M80 80 L50 120 L80 140 L80 400 L320 400 L320 140 L350 120 L320 80 L260 80 L240 60 Q200 40 160 60 L140 80 Z";

/// SVG path of the collar.
pub const SHIRT_COLLAR_PATH: &str = "M160 60 Q200 90 240 60";

/// A shirt color offered by the customizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShirtColor {
    pub name: &'static str,
    pub hex: &'static str,
    /// Text drawn over this color should be dark.
    pub dark_text: bool,
}

/// Shirt colors, the first being the default.
pub const PALETTE: [ShirtColor; 6] = [
    ShirtColor { name: "Preto", hex: "#1a1a1a", dark_text: false },
    ShirtColor { name: "Branco", hex: "#ffffff", dark_text: true },
    ShirtColor { name: "Cinza", hex: "#6b7280", dark_text: false },
    ShirtColor { name: "Marinho", hex: "#1e3a5f", dark_text: false },
    ShirtColor { name: "Vermelho", hex: "#dc2626", dark_text: false },
    ShirtColor { name: "Verde", hex: "#16a34a", dark_text: false },
];

impl ShirtColor {
    /// Look a palette color up by name.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        PALETTE.into_iter().find(|c| c.name == name)
    }

    /// The default shirt color.
    #[must_use]
    pub const fn default_color() -> Self {
        PALETTE[0]
    }

    fn is_white(&self) -> bool {
        self.hex == "#ffffff"
    }

    fn is_black(&self) -> bool {
        self.hex == "#1a1a1a"
    }

    /// Stroke around the shirt outline.
    #[must_use]
    pub fn outline_stroke(&self) -> &'static str {
        if self.is_white() { "#e5e5e5" } else { "transparent" }
    }

    /// Stroke of the collar line.
    #[must_use]
    pub fn collar_stroke(&self) -> &'static str {
        if self.is_white() {
            "#e5e5e5"
        } else if self.is_black() {
            "#333"
        } else {
            "rgba(0,0,0,0.2)"
        }
    }

    /// Stroke of the dashed placeholder box.
    #[must_use]
    pub const fn placeholder_stroke(&self) -> &'static str {
        if self.dark_text { "rgba(0,0,0,0.2)" } else { "rgba(255,255,255,0.3)" }
    }

    /// Fill of the placeholder caption.
    #[must_use]
    pub const fn placeholder_text_fill(&self) -> &'static str {
        if self.dark_text { "rgba(0,0,0,0.3)" } else { "rgba(255,255,255,0.5)" }
    }
}

/// Image position on the chest, in percent of the printable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

/// An accepted upload, kept base64-encoded so it can live in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub content_type: String,
    pub data_base64: String,
}

impl UploadedImage {
    /// Decode the stored payload back into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored payload is not valid base64.
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data_base64)
    }
}

/// URL serving a stored image.
#[must_use]
pub fn artwork_url(id: DesignId) -> String {
    format!("{ARTWORK_PATH_PREFIX}{id}")
}

/// The artwork ID behind an [`artwork_url`], if `url` is one.
#[must_use]
pub fn artwork_id_from_url(url: &str) -> Option<DesignId> {
    url.strip_prefix(ARTWORK_PATH_PREFIX)?.parse().ok()
}

/// One stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: DesignId,
    pub image: UploadedImage,
}

/// The images uploaded in one session, each kept once.
///
/// Holds at most [`MAX_STORED_ARTWORKS`] entries. Entries no longer used by
/// the draft or any cart line are dropped by [`ArtworkStore::retain_referenced`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkStore {
    entries: Vec<Artwork>,
}

impl ArtworkStore {
    #[must_use]
    pub fn get(&self, id: DesignId) -> Option<&UploadedImage> {
        self.entries.iter().find(|a| a.id == id).map(|a| &a.image)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a new image and return its ID.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TooManyImages`] when the store is full.
    pub fn insert(&mut self, image: UploadedImage) -> Result<DesignId, UploadError> {
        if self.entries.len() >= MAX_STORED_ARTWORKS {
            return Err(UploadError::TooManyImages);
        }
        let id = DesignId::generate();
        self.entries.push(Artwork { id, image });
        Ok(id)
    }

    /// Drop every image that neither `draft_artwork` nor a cart line uses.
    /// Returns how many were dropped.
    pub fn retain_referenced(&mut self, draft_artwork: Option<DesignId>, cart: &Cart) -> usize {
        let before = self.entries.len();
        self.entries.retain(|artwork| {
            draft_artwork == Some(artwork.id)
                || cart
                    .items()
                    .iter()
                    .any(|item| artwork_id_from_url(&item.product.image) == Some(artwork.id))
        });
        before - self.entries.len()
    }
}

/// Why an upload was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    #[error("file is larger than 5 MiB")]
    TooLarge,
    #[error("file is not an accepted image type")]
    NotAnImage,
    #[error("no file was sent")]
    Empty,
    #[error("too many images stored in this session")]
    TooManyImages,
}

impl UploadError {
    /// Notice title shown to the customer.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::TooLarge => "Arquivo muito grande",
            Self::NotAnImage => "Formato não suportado",
            Self::Empty => "Nenhum arquivo enviado",
            Self::TooManyImages => "Limite de imagens atingido",
        }
    }

    /// Notice description shown to the customer.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::TooLarge => "O tamanho máximo é 5MB.",
            Self::NotAnImage => "Envie uma imagem PNG, JPG, WEBP ou GIF.",
            Self::Empty => "Selecione uma imagem para enviar.",
            Self::TooManyImages => {
                "Remova uma camiseta personalizada do carrinho para enviar outra imagem."
            }
        }
    }
}

/// Check an uploaded file and encode it for storage.
///
/// # Errors
///
/// Returns [`UploadError`] if the file is empty, too large, or not one of
/// [`ACCEPTED_IMAGE_TYPES`].
pub fn accept_upload(content_type: Option<&str>, bytes: &[u8]) -> Result<UploadedImage, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    let content_type = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| ACCEPTED_IMAGE_TYPES.contains(&ct.as_str()))
        .ok_or(UploadError::NotAnImage)?;

    Ok(UploadedImage {
        content_type,
        data_base64: STANDARD.encode(bytes),
    })
}

/// Why a draft cannot be added to the cart yet.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("no image uploaded")]
    MissingImage,
    #[error("no size selected")]
    MissingSize,
}

impl DraftError {
    /// Notice title shown to the customer.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MissingImage => "Envie uma imagem",
            Self::MissingSize => "Selecione um tamanho",
        }
    }

    /// Notice description shown to the customer.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MissingImage => "Por favor, envie uma foto para personalizar sua camiseta.",
            Self::MissingSize => "Por favor, escolha um tamanho antes de adicionar ao carrinho.",
        }
    }
}

/// Where the uploaded image sits in the preview, in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

/// A visitor's work-in-progress custom shirt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationDraft {
    /// ID of the uploaded image in the session's [`ArtworkStore`].
    pub artwork: Option<DesignId>,
    pub color: String,
    pub size: Option<Size>,
    pub scale: u8,
    pub position: Position,
}

impl Default for CustomizationDraft {
    fn default() -> Self {
        Self {
            artwork: None,
            color: ShirtColor::default_color().name.to_owned(),
            size: None,
            scale: DEFAULT_SCALE,
            position: DEFAULT_POSITION,
        }
    }
}

impl CustomizationDraft {
    /// The selected palette color, falling back to the default.
    #[must_use]
    pub fn shirt_color(&self) -> ShirtColor {
        ShirtColor::find(&self.color).unwrap_or_else(ShirtColor::default_color)
    }

    /// Select a palette color. Unknown names are ignored; returns whether the
    /// color changed.
    pub fn set_color(&mut self, name: &str) -> bool {
        match ShirtColor::find(name) {
            Some(color) if color.name != self.color => {
                self.color = color.name.to_owned();
                true
            }
            _ => false,
        }
    }

    /// Set the image scale, clamped to `MIN_SCALE..=MAX_SCALE`.
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = u8::try_from(scale.clamp(u32::from(MIN_SCALE), u32::from(MAX_SCALE)))
            .unwrap_or(DEFAULT_SCALE);
    }

    /// Set the image position, each axis clamped to `0..=MAX_POSITION`.
    pub fn set_position(&mut self, x: u32, y: u32) {
        let clamp = |v: u32| u8::try_from(v.min(u32::from(MAX_POSITION))).unwrap_or(MAX_POSITION);
        self.position = Position { x: clamp(x), y: clamp(y) };
    }

    /// Restore the default scale and position.
    pub fn reset_placement(&mut self) {
        self.scale = DEFAULT_SCALE;
        self.position = DEFAULT_POSITION;
    }

    /// Drop the uploaded image, keeping the other choices.
    pub fn remove_image(&mut self) -> Option<DesignId> {
        self.artwork.take()
    }

    /// Image box in the preview.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let scale = f64::from(self.scale);
        Placement {
            x: 200.0 - scale * 1.4 + (f64::from(self.position.x) - 50.0) * 2.0,
            y: 80.0 + (50.0 - f64::from(self.position.y)) * 2.0,
            side: scale * 2.8,
        }
    }

    /// Build the cart line for this design.
    ///
    /// Every call yields a new design ID, so repeated adds become separate
    /// cart lines. The line shows the stored image by URL.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingImage`] before [`DraftError::MissingSize`].
    pub fn to_cart_item(&self) -> Result<CartItem, DraftError> {
        let artwork = self.artwork.ok_or(DraftError::MissingImage)?;
        let size = self.size.ok_or(DraftError::MissingSize)?;
        let color = self.shirt_color().name;

        let product = Product {
            key: ProductKey::Custom(DesignId::generate()),
            name: "Camiseta Personalizada".to_owned(),
            description: "Camiseta com sua foto exclusiva".to_owned(),
            full_description:
                "Camiseta personalizada com sua própria imagem, impressão de alta qualidade."
                    .to_owned(),
            price: Price::from_cents(CUSTOM_SHIRT_PRICE_CENTS, CurrencyCode::BRL),
            image: artwork_url(artwork),
            category: Category::Personalizada,
            sizes: Size::ALL.to_vec(),
            colors: vec![color.to_owned()],
        };

        Ok(CartItem::new(product, 1, size, color))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn draft_with_image() -> CustomizationDraft {
        CustomizationDraft {
            artwork: Some(DesignId::generate()),
            ..CustomizationDraft::default()
        }
    }

    fn png() -> UploadedImage {
        accept_upload(Some("image/png"), PNG_MAGIC).unwrap()
    }

    #[test]
    fn test_default_draft() {
        let draft = CustomizationDraft::default();
        assert_eq!(draft.color, "Preto");
        assert_eq!(draft.scale, 50);
        assert_eq!(draft.position, Position { x: 50, y: 45 });
        assert!(draft.artwork.is_none());
        assert!(draft.size.is_none());
    }

    #[test]
    fn test_default_placement() {
        let placement = CustomizationDraft::default().placement();
        assert_eq!(placement.side, 140.0);
        assert_eq!(placement.x, 130.0);
        assert_eq!(placement.y, 90.0);
    }

    #[test]
    fn test_placement_follows_scale_and_position() {
        let mut draft = CustomizationDraft::default();
        draft.set_scale(80);
        draft.set_position(60, 20);
        let placement = draft.placement();
        assert_eq!(placement.side, 224.0);
        assert_eq!(placement.x, 200.0 - 112.0 + 20.0);
        assert_eq!(placement.y, 140.0);
    }

    #[test]
    fn test_scale_and_position_are_clamped() {
        let mut draft = CustomizationDraft::default();
        draft.set_scale(5);
        assert_eq!(draft.scale, MIN_SCALE);
        draft.set_scale(500);
        assert_eq!(draft.scale, MAX_SCALE);
        draft.set_position(150, 300);
        assert_eq!(draft.position, Position { x: 100, y: 100 });
    }

    #[test]
    fn test_reset_placement() {
        let mut draft = CustomizationDraft::default();
        draft.set_scale(70);
        draft.set_position(0, 0);
        draft.reset_placement();
        assert_eq!(draft.scale, DEFAULT_SCALE);
        assert_eq!(draft.position, DEFAULT_POSITION);
    }

    #[test]
    fn test_set_color_ignores_unknown_names() {
        let mut draft = CustomizationDraft::default();
        assert!(draft.set_color("Branco"));
        assert!(!draft.set_color("Branco"));
        assert!(!draft.set_color("Dourado"));
        assert_eq!(draft.color, "Branco");
    }

    #[test]
    fn test_preview_strokes() {
        let white = ShirtColor::find("Branco").unwrap();
        let black = ShirtColor::find("Preto").unwrap();
        let red = ShirtColor::find("Vermelho").unwrap();

        assert_eq!(white.outline_stroke(), "#e5e5e5");
        assert_eq!(black.outline_stroke(), "transparent");
        assert_eq!(white.collar_stroke(), "#e5e5e5");
        assert_eq!(black.collar_stroke(), "#333");
        assert_eq!(red.collar_stroke(), "rgba(0,0,0,0.2)");
        assert_eq!(white.placeholder_stroke(), "rgba(0,0,0,0.2)");
        assert_eq!(red.placeholder_text_fill(), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn test_accept_upload() {
        let image = accept_upload(Some("image/PNG"), PNG_MAGIC).unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.data_base64, "iVBORw0KGgo=");
        assert_eq!(image.bytes().unwrap(), PNG_MAGIC);
    }

    #[test]
    fn test_accept_upload_rejections() {
        assert_eq!(accept_upload(Some("image/png"), &[]), Err(UploadError::Empty));
        assert_eq!(
            accept_upload(Some("application/pdf"), b"%PDF-1.7"),
            Err(UploadError::NotAnImage)
        );
        assert_eq!(accept_upload(None, PNG_MAGIC), Err(UploadError::NotAnImage));
        assert_eq!(
            accept_upload(Some("image/svg+xml"), b"<svg/>"),
            Err(UploadError::NotAnImage)
        );

        let too_big = vec![0_u8; MAX_UPLOAD_BYTES + 1];
        assert_eq!(accept_upload(Some("image/png"), &too_big), Err(UploadError::TooLarge));
        let at_limit = vec![0_u8; MAX_UPLOAD_BYTES];
        assert!(accept_upload(Some("image/jpeg"), &at_limit).is_ok());
    }

    #[test]
    fn test_to_cart_item_requires_image_then_size() {
        let mut draft = CustomizationDraft::default();
        assert_eq!(draft.to_cart_item(), Err(DraftError::MissingImage));

        draft.size = Some(Size::M);
        assert_eq!(draft.to_cart_item(), Err(DraftError::MissingImage));

        let mut draft = draft_with_image();
        assert_eq!(draft.to_cart_item(), Err(DraftError::MissingSize));
        draft.size = Some(Size::G);
        assert!(draft.to_cart_item().is_ok());
    }

    #[test]
    fn test_to_cart_item_builds_custom_product() {
        let mut draft = draft_with_image();
        draft.size = Some(Size::GG);
        draft.set_color("Verde");

        let item = draft.to_cart_item().unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.size, Size::GG);
        assert_eq!(item.color, "Verde");
        assert_eq!(item.product.name, "Camiseta Personalizada");
        assert_eq!(item.product.price.display(), "R$ 129,90");
        assert_eq!(item.product.category, Category::Personalizada);
        assert_eq!(item.product.sizes, Size::ALL.to_vec());
        assert_eq!(item.product.colors, vec!["Verde".to_string()]);
        assert_eq!(item.product.image, artwork_url(draft.artwork.unwrap()));
        assert!(matches!(item.product.key, ProductKey::Custom(_)));
    }

    #[test]
    fn test_each_add_is_a_new_design() {
        let mut draft = draft_with_image();
        draft.size = Some(Size::M);
        let first = draft.to_cart_item().unwrap();
        let second = draft.to_cart_item().unwrap();
        assert_ne!(first.key(), second.key());
    }

    #[test]
    fn test_artwork_url_parses_back() {
        let id = DesignId::generate();
        assert_eq!(artwork_id_from_url(&artwork_url(id)), Some(id));
        assert_eq!(artwork_id_from_url("/static/images/products/urban-street-tee.svg"), None);
        assert_eq!(artwork_id_from_url("/personalizar/arte/abc"), None);
    }

    #[test]
    fn test_artwork_store_is_capped() {
        let mut store = ArtworkStore::default();
        for _ in 0..MAX_STORED_ARTWORKS {
            store.insert(png()).unwrap();
        }
        assert_eq!(store.insert(png()), Err(UploadError::TooManyImages));
        assert_eq!(store.len(), MAX_STORED_ARTWORKS);
    }

    #[test]
    fn test_repeated_adds_share_one_image() {
        let mut store = ArtworkStore::default();
        let mut draft = CustomizationDraft {
            artwork: Some(store.insert(png()).unwrap()),
            size: Some(Size::M),
            ..CustomizationDraft::default()
        };

        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(draft.to_cart_item().unwrap()).unwrap();
        }
        assert_eq!(cart.items().len(), 5);
        assert_eq!(store.len(), 1);

        // Still used by the cart after the draft lets go of it
        draft.remove_image();
        assert_eq!(store.retain_referenced(draft.artwork, &cart), 0);
        assert_eq!(store.len(), 1);

        cart.clear();
        assert_eq!(store.retain_referenced(draft.artwork, &cart), 1);
        assert!(store.is_empty());
    }
}
