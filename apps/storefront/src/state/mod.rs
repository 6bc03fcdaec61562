//! # State Module
//!
//! The pieces of state a storefront session owns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │ SessionState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Mutex<Cart> │  │  user_email  │  │  store_name      │              │
//! │  │  + watch of  │  │  (persisted, │  │  currency_code   │              │
//! │  │  snapshots   │  │  observable) │  │  database_path   │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: std Mutex, held only for the duration of one change      │
//! │  • SessionState: tokio Mutex inside the session store                  │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod session;

pub use cart::CartState;
pub use config::{ConfigError, ConfigState, DEFAULT_LOG_FILTER};
pub use session::{SessionState, USER_EMAIL_KEY};
