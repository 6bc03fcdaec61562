//! # Session State
//!
//! Who is signed in. The user's email is the only persisted session value;
//! the profile picture reference lives for the app session only.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use huerto_db::{PreferenceStore, SessionStore};

use crate::error::ApiResult;

/// Preference key holding the signed-in user's email.
pub const USER_EMAIL_KEY: &str = "user_email";

/// Signed-in user tracking over any preference store.
pub struct SessionState {
    store: SessionStore<Box<dyn PreferenceStore>>,
    profile_image: watch::Sender<Option<String>>,
}

impl SessionState {
    pub fn new(preferences: Box<dyn PreferenceStore>) -> Self {
        let (profile_image, _) = watch::channel(None);
        SessionState {
            store: SessionStore::new(preferences),
            profile_image,
        }
    }

    /// The stored email, if someone is signed in.
    pub async fn user_email(&self) -> ApiResult<Option<String>> {
        Ok(self.store.load(USER_EMAIL_KEY).await?)
    }

    /// Remembers `email` as the signed-in user.
    pub async fn sign_in(&self, email: &str) -> ApiResult<()> {
        Ok(self.store.save(USER_EMAIL_KEY, email).await?)
    }

    /// Forgets the signed-in user and their profile picture.
    pub async fn sign_out(&self) -> ApiResult<()> {
        self.store.clear(USER_EMAIL_KEY).await?;
        self.set_profile_image(None);
        Ok(())
    }

    /// Reference (URI or path) of the picked or captured profile picture.
    pub fn profile_image(&self) -> Option<String> {
        self.profile_image.borrow().clone()
    }

    /// Replaces the profile picture; `None` when the picker was cancelled.
    pub fn set_profile_image(&self, uri: Option<String>) {
        self.profile_image.send_if_modified(|current| {
            if *current == uri {
                false
            } else {
                *current = uri;
                true
            }
        });
    }

    pub fn watch_profile_image(&self) -> WatchStream<Option<String>> {
        WatchStream::new(self.profile_image.subscribe())
    }

    /// The email now, then on every sign-in or sign-out.
    pub async fn watch_user_email(&self) -> ApiResult<WatchStream<Option<String>>> {
        Ok(self.store.observe(USER_EMAIL_KEY).await?)
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("key", &USER_EMAIL_KEY)
            .field("profile_image", &self.profile_image())
            .finish_non_exhaustive()
    }
}
