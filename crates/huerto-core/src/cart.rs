//! # Cart Aggregate
//!
//! The shopping cart and its read-only snapshot view.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Operation              Cart State Change      │
//! │  ─────────────            ─────────              ─────────────────      │
//! │                                                                         │
//! │  "Añadir al carrito" ───► add_item() ──────────► qty + 1 or new line   │
//! │                                                                         │
//! │  Quantity stepper ──────► update_quantity() ───► qty = n (n ≤ 0 drops) │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item() ───────► line removed          │
//! │                                                                         │
//! │  "Vaciar carrito" ──────► clear() ─────────────► empty                 │
//! │                                                                         │
//! │  Cart screen ───────────► snapshot() ──────────► (read only copy)      │
//! │                                                                         │
//! │  None of these fail. Unknown ids are no-ops.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line quantity is in `1..=MAX_ITEM_QUANTITY`
//! - Shipping is `SHIPPING_FEE` when non-empty, zero otherwise
//! - Total = subtotal + shipping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, SHIPPING_FEE};

// =============================================================================
// Cart Line
// =============================================================================

/// A product + quantity pairing inside the cart.
///
/// The product is a frozen copy taken when the line was created, so the cart
/// keeps showing the price the shopper saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Always in `1..=MAX_ITEM_QUANTITY` while the line exists.
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Product id this line is keyed by.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Advisory: the line asks for more than the product's stock.
    pub fn exceeds_stock(&self) -> bool {
        !self.product.has_stock_for(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Owned by exactly one shopping session; callers that share it across
/// threads wrap it themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Product not in cart: new line with quantity 1
    /// - Line already at `MAX_ITEM_QUANTITY`: unchanged
    ///
    /// Stock is not checked.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = (line.quantity + 1).min(MAX_ITEM_QUANTITY);
            return;
        }

        self.lines.push(CartLine::new(product));
    }

    /// Removes the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id() != product_id);
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as `remove_item`
    /// - `quantity > MAX_ITEM_QUANTITY`: clamped to `MAX_ITEM_QUANTITY`
    /// - Product not in cart: no-op (never creates a line)
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity.min(MAX_ITEM_QUANTITY);
        }
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns an owned copy of the lines with all derived totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
            shipping_fee: self.shipping_fee(),
            total: self.total(),
        }
    }

    /// Looks up the line for `product_id`.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Flat fee when the cart has anything in it.
    pub fn shipping_fee(&self) -> Money {
        if self.is_empty() {
            Money::zero()
        } else {
            SHIPPING_FEE
        }
    }

    /// Subtotal + shipping.
    pub fn total(&self) -> Money {
        self.subtotal() + self.shipping_fee()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Read-only view of a cart at one point in time.
///
/// Owns its data, so later cart mutations never show through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Cart::new().snapshot()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price: Money::from_pesos(price),
            stock: 10,
            category: "frutas".to_string(),
            image_url: String::new(),
            origin: "Valle del Maule".to_string(),
            unit: "Kg".to_string(),
        }
    }

    fn assert_invariants(cart: &Cart) {
        let snapshot = cart.snapshot();
        let expected_subtotal: i64 = snapshot
            .lines
            .iter()
            .map(|l| l.quantity * l.product.price.pesos())
            .sum();
        assert_eq!(snapshot.subtotal.pesos(), expected_subtotal);
        assert!(snapshot.lines.iter().all(|l| l.quantity > 0));

        let mut ids: Vec<&str> = snapshot.lines.iter().map(|l| l.product_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), snapshot.lines.len());

        let expected_shipping = if snapshot.lines.is_empty() { 0 } else { 3500 };
        assert_eq!(snapshot.shipping_fee.pesos(), expected_shipping);
        assert_eq!(snapshot.total, snapshot.subtotal + snapshot.shipping_fee);
        assert_eq!(
            snapshot.item_count,
            snapshot.lines.iter().map(|l| l.quantity).sum::<i64>()
        );
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let cart = Cart::new();
        let snapshot = cart.snapshot();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.item_count, 0);
        assert!(snapshot.shipping_fee.is_zero());
        assert!(snapshot.total.is_zero());
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut cart = Cart::new();
        let apples = test_product("FR001", 1200);

        cart.add_item(&apples);
        cart.add_item(&apples);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].quantity, 2);
        assert_eq!(snapshot.subtotal.pesos(), 2400);
        assert_eq!(snapshot.total.pesos(), 5900);
        assert_invariants(&cart);
    }

    #[test]
    fn test_repeated_adds_accumulate() {
        let mut cart = Cart::new();
        let product = test_product("VR002", 700);

        for _ in 0..25 {
            cart.add_item(&product);
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("VR002").map(|l| l.quantity), Some(25));
        assert_invariants(&cart);
    }

    #[test]
    fn test_stock_is_not_enforced() {
        let mut cart = Cart::new();
        let product = test_product("PO001", 5000);

        cart.update_quantity("PO001", 3);
        assert!(cart.is_empty());

        cart.add_item(&product);
        cart.update_quantity("PO001", 500);

        let line = cart.line("PO001").unwrap();
        assert_eq!(line.quantity, 500);
        assert!(line.exceeds_stock());
    }

    #[test]
    fn test_remove_recomputes_totals() {
        let mut cart = Cart::new();
        let a = test_product("FR001", 1200);
        let b = test_product("VR001", 900);

        cart.add_item(&a);
        cart.add_item(&b);
        cart.remove_item("FR001");

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].product_id(), "VR001");
        assert_eq!(snapshot.subtotal.pesos(), 900);
        assert_eq!(snapshot.total.pesos(), 4400);
        assert_invariants(&cart);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("FR001", 1200));

        cart.remove_item("NOPE");

        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        for quantity in [0, -1, -7] {
            let mut updated = Cart::new();
            let mut removed = Cart::new();
            let a = test_product("FR001", 1200);
            let b = test_product("FR002", 1000);
            for cart in [&mut updated, &mut removed] {
                cart.add_item(&a);
                cart.add_item(&b);
            }

            updated.update_quantity("FR001", quantity);
            removed.remove_item("FR001");

            assert_eq!(updated.snapshot().lines.len(), 1);
            assert_eq!(
                updated.snapshot().subtotal,
                removed.snapshot().subtotal,
                "quantity {quantity}"
            );
            assert!(updated.line("FR001").is_none());
        }
    }

    #[test]
    fn test_update_absent_does_not_create_line() {
        let mut cart = Cart::new();
        cart.update_quantity("FR001", 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_sets_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("FR003", 800));

        cart.update_quantity("FR003", 5);

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal().pesos(), 4000);
        assert_invariants(&cart);
    }

    #[test]
    fn test_huge_quantity_is_clamped() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("FR001", 1200));

        cart.update_quantity("FR001", i64::MAX);
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines[0].quantity, MAX_ITEM_QUANTITY);
        assert_eq!(snapshot.subtotal.pesos(), 1200 * MAX_ITEM_QUANTITY);
        assert_invariants(&cart);

        cart.add_item(&test_product("FR001", 1200));
        assert_eq!(cart.item_count(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_extreme_price_saturates_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("XX001", i64::MAX / 2));
        cart.update_quantity("XX001", 10);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.subtotal.pesos(), i64::MAX);
        assert_eq!(snapshot.total.pesos(), i64::MAX);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("FR001", 1200));
        cart.add_item(&test_product("PL001", 1200));

        cart.clear();

        let snapshot = cart.snapshot();
        assert!(snapshot.lines.is_empty());
        assert!(snapshot.total.is_zero());
    }

    #[test]
    fn test_snapshot_does_not_alias_cart() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("FR001", 1200));

        let before = cart.snapshot();
        cart.add_item(&test_product("FR001", 1200));
        cart.add_item(&test_product("VR003", 1500));

        assert_eq!(before.lines.len(), 1);
        assert_eq!(before.lines[0].quantity, 1);
        assert_eq!(before.total.pesos(), 4700);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for id in ["VR001", "FR001", "PL001"] {
            cart.add_item(&test_product(id, 100));
        }
        cart.add_item(&test_product("FR001", 100));

        let ids: Vec<&str> = cart.lines().iter().map(CartLine::product_id).collect();
        assert_eq!(ids, ["VR001", "FR001", "PL001"]);
    }

    #[test]
    fn test_mixed_sequence_keeps_invariants() {
        let mut cart = Cart::new();
        let products: Vec<Product> = (0..4)
            .map(|i| test_product(&format!("P{}", i), 300 * (i + 1)))
            .collect();

        for step in 0..40i64 {
            let product = &products[(step % 4) as usize];
            match step % 5 {
                0 | 1 => cart.add_item(product),
                2 => cart.update_quantity(&product.id, step % 7 - 2),
                3 => cart.remove_item(&products[((step + 1) % 4) as usize].id),
                _ => cart.add_item(product),
            }
            assert_invariants(&cart);
        }
    }
}
