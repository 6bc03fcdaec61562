//! # Repository Module
//!
//! SQL access for the storefront, one repository per table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront                                                             │
//! │       │                                                                 │
//! │       │  db.products().load_catalog()                                   │
//! │       ▼                                                                 │
//! │  ProductRepository            SqlitePreferences                        │
//! │  ├── list_all()               ├── load(key)                            │
//! │  ├── get_by_id(id)            ├── save(key, value)                     │
//! │  ├── upsert(product)          └── remove(key)                          │
//! │  ├── upsert_many(products)                                             │
//! │  ├── count()                                                            │
//! │  └── load_catalog()                                                    │
//! │       │                             │                                   │
//! │       ▼                             ▼                                   │
//! │   products table             preferences table                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog rows
//! - [`preference::SqlitePreferences`] - Key-value preferences

pub mod preference;
pub mod product;
