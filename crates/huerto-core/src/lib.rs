//! # huerto-core: Pure Domain Logic for Huerto Hogar
//!
//! This crate holds the storefront's domain logic as plain data and pure
//! functions. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Huerto Hogar Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (out of scope)                       │   │
//! │  │    Home ──► Products ──► Detail ──► Cart ──► Login/Profile      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ huerto-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌─────────┐ ┌────────┐ ┌────────────┐ ┌───────┐ │   │
//! │  │   │ catalog  │ │  money  │ │  cart  │ │ validation │ │ forms │ │   │
//! │  │   │ Product  │ │  Money  │ │  Cart  │ │  email,RUN │ │ Login │ │   │
//! │  │   └──────────┘ └─────────┘ └────────┘ └────────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product` record
//! - [`money`] - Integer peso amounts
//! - [`catalog`] - Read-only catalog interface and the built-in product list
//! - [`cart`] - Cart aggregate and its snapshot view
//! - [`validation`] - Field validators (email, RUN, passwords, required)
//! - [`forms`] - Login and register form state holders
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use huerto_core::{Cart, Catalog, StaticCatalog};
//!
//! let catalog = StaticCatalog::builtin();
//! let apples = catalog.find_by_id("FR001").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&apples);
//! cart.add_item(&apples);
//!
//! let snapshot = cart.snapshot();
//! assert_eq!(snapshot.item_count, 2);
//! assert_eq!(snapshot.subtotal.pesos(), 2400);
//! assert_eq!(snapshot.total.pesos(), 5900); // + 3500 shipping
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod forms;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSnapshot};
pub use catalog::{Catalog, StaticCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use forms::{Form, LoginErrors, LoginForm, RegisterErrors, RegisterForm};
pub use money::Money;
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat shipping fee charged on any non-empty cart.
pub const SHIPPING_FEE: Money = Money::from_pesos(3500);

/// Largest quantity a single cart line holds; larger requests are clamped.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Maximum length of a catalog search query.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;
