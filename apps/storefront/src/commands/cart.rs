//! # Cart Commands
//!
//! Cart screen actions. Every command answers with the full cart so the
//! screen can re-render from one payload.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   add_to_cart    ┌──────────┐                            │
//! │  │  Empty   │─────────────────►│ In Cart  │◄──┐ add_to_cart            │
//! │  │  Cart    │                  │          │───┘ update_cart_item       │
//! │  └──────────┘◄─────────────────└──────────┘     remove_from_cart       │
//! │        ▲       clear_cart / last line removed                           │
//! │        │                                                                │
//! │  shipping $0                     shipping $3.500                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use huerto_core::CartSnapshot;

use crate::error::ApiResult;
use crate::state::ConfigState;
use crate::Storefront;

/// Cart payload with display-ready totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: CartSnapshot,
    pub formatted_subtotal: String,
    pub formatted_shipping_fee: String,
    pub formatted_total: String,
}

impl CartResponse {
    fn new(cart: CartSnapshot, config: &ConfigState) -> Self {
        CartResponse {
            formatted_subtotal: config.format_price(cart.subtotal),
            formatted_shipping_fee: config.format_price(cart.shipping_fee),
            formatted_total: config.format_price(cart.total),
            cart,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(app: &Storefront) -> CartResponse {
    debug!("get_cart command");
    CartResponse::new(app.cart().snapshot(), app.config())
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Already in cart: quantity + 1
/// - Not in cart: new line with quantity 1
/// - Stock is shown on the detail screen but not enforced here
///
/// ## Errors
/// `NOT_FOUND` if the id is not in the catalog.
pub fn add_to_cart(app: &Storefront, product_id: &str) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = app.catalog().get(product_id)?;
    let snapshot = app.cart().mutate(|cart| cart.add_item(&product));

    Ok(CartResponse::new(snapshot, app.config()))
}

/// Sets a line's quantity; zero or negative removes the line and anything
/// above `MAX_ITEM_QUANTITY` is clamped.
pub fn update_cart_item(app: &Storefront, product_id: &str, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let snapshot = app
        .cart()
        .mutate(|cart| cart.update_quantity(product_id, quantity));
    CartResponse::new(snapshot, app.config())
}

/// Removes a line. Unknown ids are ignored.
pub fn remove_from_cart(app: &Storefront, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let snapshot = app.cart().mutate(|cart| cart.remove_item(product_id));
    CartResponse::new(snapshot, app.config())
}

/// Empties the cart.
pub fn clear_cart(app: &Storefront) -> CartResponse {
    debug!("clear_cart command");

    let snapshot = app.cart().mutate(|cart| cart.clear());
    CartResponse::new(snapshot, app.config())
}

/// Snapshots for the cart badge: the current one, then one per change.
pub fn watch_cart(app: &Storefront) -> WatchStream<CartSnapshot> {
    app.cart().watch()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use huerto_core::MAX_ITEM_QUANTITY;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_add_twice_then_totals() {
        let app = Storefront::in_memory().await.unwrap();

        add_to_cart(&app, "FR001").unwrap();
        let response = add_to_cart(&app, "FR001").unwrap();

        assert_eq!(response.cart.lines.len(), 1);
        assert_eq!(response.cart.lines[0].quantity, 2);
        assert_eq!(response.cart.subtotal.pesos(), 2400);
        assert_eq!(response.formatted_subtotal, "$2.400 CLP");
        assert_eq!(response.formatted_shipping_fee, "$3.500 CLP");
        assert_eq!(response.formatted_total, "$5.900 CLP");
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let app = Storefront::in_memory().await.unwrap();

        let err = add_to_cart(&app, "XX999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&app).cart.is_empty());
    }

    #[tokio::test]
    async fn test_update_remove_clear() {
        let app = Storefront::in_memory().await.unwrap();
        add_to_cart(&app, "FR001").unwrap();
        add_to_cart(&app, "VR002").unwrap();

        let response = update_cart_item(&app, "VR002", 3);
        assert_eq!(response.cart.item_count, 4);
        assert_eq!(response.cart.subtotal.pesos(), 1200 + 3 * 700);

        let response = update_cart_item(&app, "VR002", 0);
        assert_eq!(response.cart.lines.len(), 1);

        let response = remove_from_cart(&app, "FR001");
        assert!(response.cart.is_empty());
        assert_eq!(response.formatted_total, "$0 CLP");

        add_to_cart(&app, "PL001").unwrap();
        let response = clear_cart(&app);
        assert!(response.cart.is_empty());
        assert_eq!(response.cart.shipping_fee.pesos(), 0);
    }

    #[tokio::test]
    async fn test_update_absent_item_is_noop() {
        let app = Storefront::in_memory().await.unwrap();
        add_to_cart(&app, "FR001").unwrap();

        let before = get_cart(&app);
        let after = update_cart_item(&app, "PO002", 5);
        assert_eq!(before.cart, after.cart);
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_clamped() {
        let app = Storefront::in_memory().await.unwrap();
        add_to_cart(&app, "FR001").unwrap();

        let response = update_cart_item(&app, "FR001", i64::MAX / 1000);
        assert_eq!(response.cart.item_count, MAX_ITEM_QUANTITY);
        assert_eq!(response.cart.subtotal.pesos(), 1200 * MAX_ITEM_QUANTITY);

        let again = get_cart(&app);
        assert_eq!(again.cart, response.cart);
        assert_eq!(again.formatted_subtotal, "$1.198.800 CLP");
    }

    #[tokio::test]
    async fn test_watch_cart_follows_commands() {
        let app = Storefront::in_memory().await.unwrap();
        let mut badge = watch_cart(&app);
        assert_eq!(badge.next().await.unwrap().item_count, 0);

        add_to_cart(&app, "FR002").unwrap();
        assert_eq!(badge.next().await.unwrap().item_count, 1);
    }
}
