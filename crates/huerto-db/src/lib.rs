//! # huerto-db: Storage Layer for Huerto Hogar
//!
//! Local SQLite storage for the storefront, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Huerto Hogar Data Flow                             │
//! │                                                                         │
//! │  Storefront command (list_products, submit_login)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    huerto-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌─────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │   │  Repositories   │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄──│ ProductRepo     │   │  (embedded)  │   │   │
//! │  │   │  SqlitePool   │   │ SqlitePrefs     │   │ 001_init.sql │   │   │
//! │  │   └───────────────┘   └────────┬────────┘   └──────────────┘   │   │
//! │  │                                │                                │   │
//! │  │                       ┌────────▼────────┐                       │   │
//! │  │                       │  SessionStore   │ save / observe / clear│   │
//! │  │                       │  (session.rs)   │                       │   │
//! │  │                       └─────────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file in the platform data dir (huerto.db)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product and preference repositories
//! - [`session`] - Observable key-value session store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use huerto_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("huerto.db")).await?;
//! let catalog = db.products().load_catalog().await?;
//!
//! let session = db.session();
//! session.save("user_email", "ana@huerto.cl").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::preference::SqlitePreferences;
pub use repository::product::ProductRepository;
pub use session::{MemoryPreferences, PreferenceStore, SessionStore};
