//! # Session Store
//!
//! Observable key-value persistence for values that must survive a restart,
//! such as the signed-in user's email.
//!
//! ## Observation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   save("user_email", "ana@huerto.cl")                                  │
//! │        │                                                                │
//! │        ├──► PreferenceStore::save   (SQLite row or in-memory map)      │
//! │        │                                                                │
//! │        └──► watch::Sender["user_email"].send(Some("ana@huerto.cl"))    │
//! │                     │                                                   │
//! │          ┌──────────┴──────────┐                                        │
//! │          ▼                     ▼                                        │
//! │   observe() stream A    observe() stream B                             │
//! │   (profile screen)      (home header)                                  │
//! │                                                                         │
//! │   A new observer first receives the current value, then every change.  │
//! │   Slow observers only see the latest value (watch semantics).          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex, RwLock};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Preference Store Trait
// =============================================================================

/// Asynchronous single-string key-value storage.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value, if any.
    async fn load(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> DbResult<()>;

    /// Deletes the key. Returns true if something was removed.
    async fn remove(&self, key: &str) -> DbResult<bool>;
}

#[async_trait]
impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).save(key, value).await
    }

    async fn remove(&self, key: &str) -> DbResult<bool> {
        (**self).remove(key).await
    }
}

/// Volatile preference store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Key-value store whose keys can be observed as streams.
///
/// ## Usage
/// ```rust,ignore
/// let session = SessionStore::new(MemoryPreferences::new());
/// let mut emails = session.observe("user_email").await?;
///
/// session.save("user_email", "ana@huerto.cl").await?;
/// assert_eq!(emails.next().await, Some(None));                       // initial
/// assert_eq!(emails.next().await, Some(Some("ana@huerto.cl".into()))); // change
/// ```
pub struct SessionStore<S: PreferenceStore> {
    store: S,
    /// One channel per key that has been observed at least once.
    channels: Mutex<HashMap<String, watch::Sender<Option<String>>>>,
}

impl<S: PreferenceStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        SessionStore {
            store,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Persists `value` and notifies observers of `key`.
    pub async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        let channels = self.channels.lock().await;
        self.store.save(key, value).await?;
        debug!(key = %key, "Session value saved");

        if let Some(tx) = channels.get(key) {
            publish(tx, Some(value.to_string()));
        }
        Ok(())
    }

    /// Returns the current value without subscribing.
    pub async fn load(&self, key: &str) -> DbResult<Option<String>> {
        self.store.load(key).await
    }

    /// Streams the value of `key`: the current value first, then each change.
    ///
    /// The stream ends only when the store is dropped.
    pub async fn observe(&self, key: &str) -> DbResult<WatchStream<Option<String>>> {
        let mut channels = self.channels.lock().await;

        if let Some(tx) = channels.get(key) {
            return Ok(WatchStream::new(tx.subscribe()));
        }

        let current = self.store.load(key).await?;
        let (tx, rx) = watch::channel(current);
        channels.insert(key.to_string(), tx);
        debug!(key = %key, "Session key observed");

        Ok(WatchStream::new(rx))
    }

    /// Removes `key` and notifies observers with `None`.
    pub async fn clear(&self, key: &str) -> DbResult<()> {
        let channels = self.channels.lock().await;
        let removed = self.store.remove(key).await?;
        debug!(key = %key, removed, "Session value cleared");

        if let Some(tx) = channels.get(key) {
            publish(tx, None);
        }
        Ok(())
    }

    /// Borrowing access to the underlying preference store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Sends only real changes so observers never see the same value twice.
fn publish(tx: &watch::Sender<Option<String>>, value: Option<String>) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
