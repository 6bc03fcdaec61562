//! # Domain Types
//!
//! The product record shared by the catalog, the cart and the screens.
//!
//! ## Product Shape
//! ```text
//! ┌─────────────────────────────────────┐
//! │              Product                │
//! │  ─────────────────────────────────  │
//! │  id          "FR001" (business key) │
//! │  name        "Manzanas Fuji"        │
//! │  price       Money (pesos)          │
//! │  stock       150 (advisory)         │
//! │  category    "frutas"               │
//! │  origin      "Valle del Maule"      │
//! │  unit        "Kg"                   │
//! └─────────────────────────────────────┘
//! ```
//!
//! Products are immutable once loaded; the catalog hands out clones.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Unit label used when a product record does not carry one.
pub const DEFAULT_UNIT: &str = "Kg";

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique business identifier (e.g. `FR001`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description for the detail screen.
    pub description: String,

    /// Unit price in pesos.
    pub price: Money,

    /// Units on hand. Shown to the shopper, never enforced by the cart.
    pub stock: u32,

    /// Category tag (`frutas`, `verduras`, `organicos`, `lacteos`).
    pub category: String,

    /// Image reference (URL).
    pub image_url: String,

    /// Origin region.
    pub origin: String,

    /// Unit the price refers to (`Kg`, `L`, `Frasco 500g`).
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Product {
    /// Advisory stock check for display purposes.
    ///
    /// The cart does not call this; quantities above stock are allowed.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        quantity <= i64::from(self.stock)
    }

    /// Returns true if the product belongs to `category` (case-insensitive).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// Case-insensitive substring match against name and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
