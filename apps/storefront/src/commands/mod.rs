//! # Commands Module
//!
//! One function per screen action. Each takes the `Storefront` context by
//! reference plus the action's arguments.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Home, product list and product detail screens
//! ├── cart.rs     ◄─── Cart screen
//! ├── auth.rs     ◄─── Login and register screens
//! └── profile.rs  ◄─── Profile screen
//! ```
//!
//! ## Screen → Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home           featured_products(), list_categories()                 │
//! │  Products       list_products(query, category)                         │
//! │  Detail         get_product_detail(id), add_to_cart(id)                │
//! │  Cart           get_cart(), update_cart_item(), remove_from_cart(),    │
//! │                 clear_cart(), watch_cart()                             │
//! │  Login          submit_login(&mut form)                                │
//! │  Register       submit_register(&mut form)                             │
//! │  Profile        load_profile(), watch_profile(), logout(),             │
//! │                 update_profile_image(uri)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures come back as `ApiError` (see `error.rs`).

pub mod auth;
pub mod cart;
pub mod product;
pub mod profile;

pub use auth::{submit_login, submit_register};
pub use cart::{
    add_to_cart, clear_cart, get_cart, remove_from_cart, update_cart_item, watch_cart,
    CartResponse,
};
pub use product::{
    featured_products, get_product_detail, list_categories, list_products, ProductDetail,
};
pub use profile::{load_profile, logout, update_profile_image, watch_profile, Profile};
