//! # Product Commands
//!
//! Catalog browsing for the home, product list and detail screens.
//!
//! The catalog is an immutable snapshot loaded at startup, so none of these
//! commands touch the database.

use serde::Serialize;
use tracing::debug;

use huerto_core::Product;

use crate::error::{ApiError, ApiResult};
use crate::Storefront;

/// Product detail screen payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,

    /// Price with currency, e.g. `$1.200 CLP`.
    pub formatted_price: String,

    /// Quantity already in the cart (0 if none).
    pub quantity_in_cart: i64,
}

/// Lists products matching a free-text query and optional category.
///
/// ## Arguments
/// * `query` - Substring of name or description; empty matches everything
/// * `category` - Category tag such as `frutas`
pub fn list_products(
    app: &Storefront,
    query: &str,
    category: Option<&str>,
) -> ApiResult<Vec<Product>> {
    debug!(query = %query, ?category, "list_products command");

    let products = app.catalog().search(query, category)?;
    debug!(count = products.len(), "Products matched");
    Ok(products)
}

/// Home-screen highlights.
pub fn featured_products(app: &Storefront) -> Vec<Product> {
    app.catalog().featured()
}

/// Category tags for the filter chips.
pub fn list_categories(app: &Storefront) -> Vec<String> {
    app.catalog().categories()
}

/// Loads the product detail screen.
///
/// ## Errors
/// * `VALIDATION_ERROR` "Invalid product id" - navigation carried no id
/// * `NOT_FOUND` "Product not found: <id>" - id not in the catalog
pub fn get_product_detail(app: &Storefront, product_id: Option<&str>) -> ApiResult<ProductDetail> {
    let product_id = product_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Invalid product id"))?;

    debug!(product_id = %product_id, "get_product_detail command");

    let product = app.catalog().get(product_id)?;
    let quantity_in_cart = app
        .cart()
        .with_cart(|cart| cart.line(product_id).map_or(0, |line| line.quantity));

    Ok(ProductDetail {
        formatted_price: app.config().format_price(product.price),
        quantity_in_cart,
        product,
    })
}
