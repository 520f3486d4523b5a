//! The product catalog.
//!
//! The catalog is a fixed table compiled into the binary and loaded once at
//! startup. Products are never created or edited at runtime.

use customtee_core::{Category, CurrencyCode, Price, Product, ProductId, ProductKey, Size};

/// One row of the built-in catalog table.
struct Entry {
    id: u32,
    name: &'static str,
    description: &'static str,
    full_description: &'static str,
    price_cents: i64,
    image: &'static str,
    category: Category,
    sizes: &'static [Size],
    colors: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        name: "Urban Street Tee",
        description: "Camiseta minimalista com design urbano exclusivo",
        full_description: "Nossa Urban Street Tee é a escolha perfeita para quem busca um estilo minimalista com personalidade. Confeccionada em algodão premium 100% orgânico, oferece conforto superior durante todo o dia. O design exclusivo foi criado por artistas locais, tornando cada peça única. Ideal para o dia a dia, combina perfeitamente com jeans ou shorts.",
        price_cents: 8990,
        image: "/static/images/products/urban-street-tee.svg",
        category: Category::Street,
        sizes: &[Size::P, Size::M, Size::G, Size::GG],
        colors: &["Preto", "Branco", "Cinza"],
    },
    Entry {
        id: 2,
        name: "Geometric Vision",
        description: "Estampa geométrica vibrante com cores intensas",
        full_description: "A Geometric Vision é para os ousados que não têm medo de se destacar. Com uma estampa geométrica cuidadosamente desenvolvida, esta camiseta traz cores vibrantes que capturam olhares. Tecido macio de alta qualidade com tecnologia anti-transpirante. Perfeita para festivais, shows ou qualquer momento em que você queira brilhar.",
        price_cents: 10990,
        image: "/static/images/products/geometric-vision-tee.svg",
        category: Category::Arte,
        sizes: &[Size::P, Size::M, Size::G, Size::GG, Size::XG],
        colors: &["Multicolor", "Azul", "Roxo"],
    },
    Entry {
        id: 3,
        name: "Retro Wave",
        description: "Inspirada nos anos 80 com toque contemporâneo",
        full_description: "Viaje no tempo com a Retro Wave! Esta camiseta combina a nostalgia dos anos 80 com um design moderno e atual. As cores neon e o visual synthwave fazem dela uma peça de colecionador. Material premium com acabamento diferenciado. Ideal para quem aprecia a cultura pop e quer expressar seu estilo único.",
        price_cents: 9990,
        image: "/static/images/products/retro-wave-tee.svg",
        category: Category::Retro,
        sizes: &[Size::P, Size::M, Size::G, Size::GG],
        colors: &["Rosa Neon", "Azul Neon", "Preto"],
    },
    Entry {
        id: 4,
        name: "Nature Elements",
        description: "Conexão com a natureza em cada detalhe",
        full_description: "A Nature Elements celebra a beleza do mundo natural. Com estampas inspiradas em elementos da floresta, montanhas e oceano, esta camiseta é perfeita para os amantes da natureza. Produzida com materiais sustentáveis e tintas ecológicas. Parte dos lucros é destinada a projetos de reflorestamento.",
        price_cents: 11990,
        image: "/static/images/products/nature-elements-tee.svg",
        category: Category::Eco,
        sizes: &[Size::P, Size::M, Size::G, Size::GG, Size::XG],
        colors: &["Verde", "Marrom", "Azul Oceano"],
    },
    Entry {
        id: 5,
        name: "Abstract Mind",
        description: "Arte abstrata exclusiva para mentes criativas",
        full_description: "A Abstract Mind é uma tela em branco transformada em arte vestível. Cada estampa é uma obra de arte abstrata única, criada por artistas contemporâneos. Esta camiseta é mais que uma roupa - é uma declaração artística. Tecido de alta gramatura para durabilidade excepcional. Edição limitada com certificado de autenticidade.",
        price_cents: 13990,
        image: "/static/images/products/abstract-mind-tee.svg",
        category: Category::Arte,
        sizes: &[Size::P, Size::M, Size::G, Size::GG],
        colors: &["Multicolor", "Preto/Branco", "Tons Terrosos"],
    },
    Entry {
        id: 6,
        name: "Minimal Essential",
        description: "Simplicidade elegante para todos os momentos",
        full_description: "Às vezes, menos é mais. A Minimal Essential prova que a simplicidade pode ser sofisticada. Design clean com pequenos detalhes que fazem toda a diferença. Corte impecável e caimento perfeito. Versátil o suficiente para o escritório ou um encontro casual. O básico elevado ao máximo.",
        price_cents: 7990,
        image: "/static/images/products/minimal-essential-tee.svg",
        category: Category::Basico,
        sizes: &[Size::PP, Size::P, Size::M, Size::G, Size::GG, Size::XG],
        colors: &["Preto", "Branco", "Cinza", "Marinho"],
    },
];

impl Entry {
    fn to_product(&self) -> Product {
        Product {
            key: ProductKey::Catalog(ProductId::new(self.id)),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            full_description: self.full_description.to_owned(),
            price: Price::from_cents(self.price_cents, CurrencyCode::BRL),
            image: self.image.to_owned(),
            category: self.category,
            sizes: self.sizes.to_vec(),
            colors: self.colors.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The catalog shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: ENTRIES.iter().map(Entry::to_product).collect(),
        }
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look a product up by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.catalog_id() == Some(id))
    }

    /// Products in `category`, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// The first `count` products, shown on the home page.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        self.products.get(..count).unwrap_or(&self.products)
    }
}
