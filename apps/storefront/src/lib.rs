//! # Huerto Hogar Storefront
//!
//! Orchestration layer between the screens and the domain/storage crates.
//!
//! ## Module Organization
//! ```text
//! huerto_storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & Storefront context)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart + snapshot channel
//! │   ├── config.rs   ◄─── toml/env configuration
//! │   └── session.rs  ◄─── Signed-in user email
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog browsing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── auth.rs     ◄─── Login / register submission
//! │   └── profile.rs  ◄─── Profile and logout
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## One Context Object
//! Every screen receives the same `&Storefront`. It owns the cart and the
//! session for the lifetime of the app; nothing is resolved implicitly.
//!
//! ```rust,ignore
//! let config = ConfigState::load(None)?;
//! init_tracing(&config.log_filter);
//!
//! let app = Storefront::bootstrap(config).await?;
//! let cart = commands::cart::add_to_cart(&app, "FR001")?;
//! println!("{}", cart.formatted_total);
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use huerto_core::{Catalog, StaticCatalog};
use huerto_db::{Database, DbConfig};

use error::ApiResult;
use state::{CartState, ConfigState, SessionState, DEFAULT_LOG_FILTER};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Filter Precedence
/// 1. `RUST_LOG`
/// 2. `filter` (the config's `log_filter`)
/// 3. `info,huerto=debug,sqlx=warn`
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// The explicit session context handed to every screen.
pub struct Storefront {
    session_id: Uuid,
    config: ConfigState,
    db: Database,
    catalog: Arc<dyn Catalog>,
    cart: CartState,
    session: SessionState,
}

impl Storefront {
    /// Opens storage and builds the session context.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1. Validate config                                                │
    /// │  2. Resolve database path (platform data dir unless configured)    │
    /// │  3. Connect + run migrations                                       │
    /// │  4. Seed built-in products into an empty table (if enabled)        │
    /// │  5. Load catalog snapshot; empty table → built-in list            │
    /// │  6. Empty cart, session bound to the preferences table             │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn bootstrap(config: ConfigState) -> ApiResult<Self> {
        config.validate()?;

        let db_path = config.resolve_database_path()?;
        info!(?db_path, store = %config.store_name, "Starting storefront");

        let db_config = if db_path == std::path::Path::new(huerto_db::pool::MEMORY_PATH) {
            DbConfig::in_memory()
        } else {
            DbConfig::new(db_path)
        };
        let db = Database::new(db_config).await?;

        if config.seed_catalog {
            db.products().seed_builtin().await?;
        }

        let mut catalog = db.products().load_catalog().await?;
        if catalog.is_empty() {
            warn!("Products table is empty, using the built-in catalog");
            catalog = StaticCatalog::builtin();
        }

        let session = SessionState::new(Box::new(db.preferences()));
        let session_id = Uuid::new_v4();
        info!(%session_id, products = catalog.len(), "Storefront ready");

        Ok(Storefront {
            session_id,
            config,
            db,
            catalog: Arc::new(catalog),
            cart: CartState::new(),
            session,
        })
    }

    /// A throwaway storefront over an in-memory database.
    pub async fn in_memory() -> ApiResult<Self> {
        let config = ConfigState {
            database_path: Some(huerto_db::pool::MEMORY_PATH.into()),
            ..ConfigState::default()
        };
        Self::bootstrap(config).await
    }

    /// Replaces the catalog, e.g. with a remote or test data source.
    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        info!(session_id = %self.session_id, "Shutting down storefront");
        self.db.close().await;
    }
}
