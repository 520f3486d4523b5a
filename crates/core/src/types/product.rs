//! Catalog product types.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::{DesignId, ProductId};
use super::price::Price;

/// Error returned when a size or category string is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

/// Garment size, in Brazilian sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    PP,
    P,
    M,
    G,
    GG,
    XG,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 6] = [Self::PP, Self::P, Self::M, Self::G, Self::GG, Self::XG];

    /// Label shown to customers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PP => "PP",
            Self::P => "P",
            Self::M => "M",
            Self::G => "G",
            Self::GG => "GG",
            Self::XG => "XG",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownValue {
                kind: "size",
                value: s.to_owned(),
            })
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Street,
    Arte,
    Retro,
    Eco,
    Basico,
    /// Customer-designed shirts; never listed in the catalog filters.
    Personalizada,
}

impl Category {
    /// Categories offered as catalog filters, in display order.
    pub const FILTERABLE: [Self; 5] = [
        Self::Street,
        Self::Arte,
        Self::Retro,
        Self::Eco,
        Self::Basico,
    ];

    /// Label shown to customers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::Arte => "Arte",
            Self::Retro => "Retro",
            Self::Eco => "Eco",
            Self::Basico => "Básico",
            Self::Personalizada => "Personalizada",
        }
    }

    /// URL-safe slug used in query strings.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Arte => "arte",
            Self::Retro => "retro",
            Self::Eco => "eco",
            Self::Basico => "basico",
            Self::Personalizada => "personalizada",
        }
    }

    /// Look a category up by its slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::FILTERABLE
            .into_iter()
            .chain([Self::Personalizada])
            .find(|c| c.slug() == slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownValue {
            kind: "category",
            value: s.to_owned(),
        })
    }
}

/// What a cart line points at: a catalog product or a customized design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ProductKey {
    Catalog(ProductId),
    Custom(DesignId),
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(id) => write!(f, "catalog:{id}"),
            Self::Custom(id) => write!(f, "custom:{id}"),
        }
    }
}

impl FromStr for ProductKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownValue {
            kind: "product key",
            value: s.to_owned(),
        };
        match s.split_once(':') {
            Some(("catalog", id)) => id.parse().map(Self::Catalog).map_err(|_| unknown()),
            Some(("custom", id)) => id.parse().map(Self::Custom).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

/// A product that can be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub key: ProductKey,
    pub name: String,
    /// One-line description used on cards.
    pub description: String,
    /// Long description used on the detail page.
    pub full_description: String,
    pub price: Price,
    /// Static asset path, or a `data:` URL for customized shirts.
    pub image: String,
    pub category: Category,
    pub sizes: Vec<Size>,
    pub colors: Vec<String>,
}

impl Product {
    /// Catalog ID, if this is a catalog product.
    #[must_use]
    pub const fn catalog_id(&self) -> Option<ProductId> {
        match self.key {
            ProductKey::Catalog(id) => Some(id),
            ProductKey::Custom(_) => None,
        }
    }

    /// Returns true if the product is offered in `size`.
    #[must_use]
    pub fn offers_size(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }

    /// Returns true if the product is offered in `color`.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}
