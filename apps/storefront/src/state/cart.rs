//! # Cart State
//!
//! The shopper's cart plus a channel that republishes its snapshot after
//! every change.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action           Command               Cart Change              │
//! │  ─────────────           ───────               ───────────              │
//! │                                                                         │
//! │  Tap "Agregar" ─────────► add_to_cart() ──────► add_item(product)      │
//! │  Change quantity ───────► update_cart_item() ─► update_quantity(id, n) │
//! │  Tap trash icon ────────► remove_from_cart() ─► remove_item(id)        │
//! │  Tap "Vaciar" ──────────► clear_cart() ───────► clear()                │
//! │                                                                         │
//! │  After each change: watch::Sender<CartSnapshot>::send_replace(..)      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  Cart badge, cart screen and checkout summary re-render from the       │
//! │  latest snapshot.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use huerto_core::{Cart, CartSnapshot};

/// Shared cart for one shopper session.
#[derive(Debug)]
pub struct CartState {
    cart: Mutex<Cart>,
    snapshots: watch::Sender<CartSnapshot>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        let cart = Cart::new();
        let (snapshots, _) = watch::channel(cart.snapshot());

        CartState {
            cart: Mutex::new(cart),
            snapshots,
        }
    }

    // Cart methods clamp quantities and saturate totals instead of panicking,
    // so a poisoned lock still holds a consistent cart.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&*self.lock())
    }

    /// Applies a change, publishes the new snapshot and returns it.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = cart_state.mutate(|cart| cart.add_item(&product));
    /// ```
    pub fn mutate<F>(&self, f: F) -> CartSnapshot
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.lock();
        f(&mut *cart);

        let snapshot = cart.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(Cart::snapshot)
    }

    /// Receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    /// Stream of snapshots: the current one first, then one per change.
    pub fn watch(&self) -> WatchStream<CartSnapshot> {
        WatchStream::new(self.subscribe())
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huerto_core::{Catalog, StaticCatalog};
    use tokio_stream::StreamExt;

    #[test]
    fn test_mutate_returns_and_publishes_snapshot() {
        let catalog = StaticCatalog::builtin();
        let apples = catalog.get("FR001").unwrap();
        let state = CartState::new();
        let rx = state.subscribe();

        let snapshot = state.mutate(|cart| cart.add_item(&apples));
        assert_eq!(snapshot.item_count, 1);
        assert_eq!(rx.borrow().item_count, 1);
        assert_eq!(state.snapshot(), snapshot);
    }

    #[tokio::test]
    async fn test_watch_emits_current_then_changes() {
        let catalog = StaticCatalog::builtin();
        let honey = catalog.get("PO001").unwrap();
        let state = CartState::new();
        let mut stream = state.watch();

        assert!(stream.next().await.unwrap().is_empty());

        state.mutate(|cart| cart.add_item(&honey));
        let snapshot = stream.next().await.unwrap();
        assert_eq!(snapshot.subtotal.pesos(), 5000);
        assert_eq!(snapshot.total.pesos(), 8500);

        state.mutate(Cart::clear);
        assert!(stream.next().await.unwrap().is_empty());
    }
}
