//! # Product Catalog
//!
//! The read-only set of purchasable products.
//!
//! ## Read Interface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog (trait)                                   │
//! │                                                                         │
//! │   list_all()        ──► every product, catalog order                   │
//! │   find_by_id(id)    ──► Option<Product>                                │
//! │   get(id)           ──► Product or CoreError::ProductNotFound          │
//! │   search(q, cat)    ──► name/description match, optional category      │
//! │   categories()      ──► distinct tags, first-seen order                │
//! │                                                                         │
//! │   StaticCatalog: immutable Vec<Product>, shared by any number of       │
//! │   readers. Built from the storefront's literal list or from rows the   │
//! │   storage layer loaded.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_search_query, ValidationResult};

/// Product ids highlighted on the home screen.
pub const FEATURED_PRODUCT_IDS: [&str; 3] = ["FR001", "VR001", "PO001"];

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read-only product source.
pub trait Catalog: Send + Sync {
    /// Every product, in catalog order.
    fn list_all(&self) -> Vec<Product>;

    /// Looks a product up by its identifier.
    fn find_by_id(&self, id: &str) -> Option<Product>;

    /// Like `find_by_id`, but absence is an error.
    fn get(&self, id: &str) -> CoreResult<Product> {
        self.find_by_id(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Filters products by free-text query and optional category tag.
    ///
    /// An empty query with no category returns the whole catalog.
    fn search(&self, query: &str, category: Option<&str>) -> ValidationResult<Vec<Product>> {
        let query = validate_search_query(query)?;

        Ok(self
            .list_all()
            .into_iter()
            .filter(|p| category.map_or(true, |c| p.in_category(c)))
            .filter(|p| p.matches_query(&query))
            .collect())
    }

    /// Distinct category tags in first-seen order.
    fn categories(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for product in self.list_all() {
            if !tags.iter().any(|t| t == &product.category) {
                tags.push(product.category);
            }
        }
        tags
    }

    /// Home-screen highlights that exist in this catalog.
    fn featured(&self) -> Vec<Product> {
        FEATURED_PRODUCT_IDS
            .iter()
            .filter_map(|id| self.find_by_id(id))
            .collect()
    }
}

// =============================================================================
// Static Catalog
// =============================================================================

/// Immutable in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Builds a catalog from already-loaded products.
    ///
    /// Later duplicates of an id are dropped so lookups stay unambiguous.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        StaticCatalog { products: unique }
    }

    /// The storefront's built-in product list.
    ///
    /// ```rust
    /// use huerto_core::{Catalog, StaticCatalog};
    ///
    /// let catalog = StaticCatalog::builtin();
    /// assert_eq!(catalog.len(), 9);
    /// assert_eq!(catalog.find_by_id("PL001").unwrap().unit, "L");
    /// ```
    pub fn builtin() -> Self {
        Self::from_products(builtin_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Borrowing view of the products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Catalog for StaticCatalog {
    fn list_all(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn find_by_id(&self, id: &str) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }
}

// =============================================================================
// Built-in Data
// =============================================================================

const IMAGE_BASE: &str = "https://github.com/ElMabre/ProyectoHuertoHogar/blob/main/img";

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    stock: u32,
    category: &str,
    image: &str,
    origin: &str,
    unit: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_pesos(price),
        stock,
        category: category.to_string(),
        image_url: format!("{}/{}?raw=true", IMAGE_BASE, image),
        origin: origin.to_string(),
        unit: unit.to_string(),
    }
}

/// Products grouped by category: fruits, vegetables, organics, dairy.
pub fn builtin_products() -> Vec<Product> {
    vec![
        product("FR001", "Manzanas Fuji", "Manzanas Fuji crujientes y dulces.", 1200, 150, "frutas", "manzana.jpg", "Valle del Maule", "Kg"),
        product("FR002", "Naranjas Valencia", "Jugosas y ricas en vitamina C.", 1000, 200, "frutas", "naranja.jpg", "Región de Valparaíso", "Kg"),
        product("FR003", "Plátanos Cavendish", "Plátanos maduros y dulces.", 800, 250, "frutas", "platano.jpg", "Región de O'Higgins", "Kg"),
        product("VR001", "Zanahorias Orgánicas", "Zanahorias crujientes sin pesticidas.", 900, 100, "verduras", "zanahoria.jpg", "Región de O'Higgins", "Kg"),
        product("VR002", "Espinacas Frescas", "Espinacas frescas y nutritivas.", 700, 80, "verduras", "espinaca.jpg", "Región Metropolitana", "Bolsa 500g"),
        product("VR003", "Pimientos Tricolores", "Pimientos rojos, amarillos y verdes.", 1500, 120, "verduras", "pimiento.jpg", "Región de Valparaíso", "Kg"),
        product("PO001", "Miel Orgánica", "Miel pura y orgánica local.", 5000, 50, "organicos", "miel.jpg", "Región del Maule", "Frasco 500g"),
        product("PO002", "Quinua Orgánica", "Quinua orgánica de alta calidad.", 3500, 75, "organicos", "quinua.jpg", "Región de La Araucanía", "Kg"),
        product("PL001", "Leche Entera", "Leche entera fresca de praderas.", 1200, 60, "lacteos", "leche.jpg", "Región de Los Lagos", "L"),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
