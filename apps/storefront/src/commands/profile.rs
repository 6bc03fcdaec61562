//! # Profile Commands
//!
//! The profile screen shows who is signed in, their picture, and offers
//! logout. Capturing or picking the picture happens outside this crate; only
//! the resulting reference is held here.

use serde::Serialize;
use tokio_stream::{self as stream, Stream, StreamExt};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::Storefront;

/// Profile screen payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// `None` when nobody is signed in.
    pub user_email: Option<String>,

    /// Picture reference (URI or path); `None` until one is chosen.
    pub profile_image_uri: Option<String>,
}

impl Profile {
    pub fn is_signed_in(&self) -> bool {
        self.user_email.is_some()
    }

    fn apply(&self, change: ProfileChange) -> Profile {
        match change {
            ProfileChange::Email(user_email) => Profile {
                user_email,
                ..self.clone()
            },
            ProfileChange::Image(profile_image_uri) => Profile {
                profile_image_uri,
                ..self.clone()
            },
        }
    }
}

enum ProfileChange {
    Email(Option<String>),
    Image(Option<String>),
}

/// Loads the profile once.
pub async fn load_profile(app: &Storefront) -> ApiResult<Profile> {
    debug!("load_profile command");

    Ok(Profile {
        user_email: app.session().user_email().await?,
        profile_image_uri: app.session().profile_image(),
    })
}

/// Sets or clears the profile picture reference.
pub async fn update_profile_image(app: &Storefront, uri: Option<&str>) -> ApiResult<Profile> {
    debug!(has_image = uri.is_some(), "update_profile_image command");

    app.session().set_profile_image(uri.map(str::to_string));
    load_profile(app).await
}

/// The profile now, then again after every sign-in, logout or picture change.
pub async fn watch_profile(app: &Storefront) -> ApiResult<impl Stream<Item = Profile>> {
    let emails = app.session().watch_user_email().await?;
    let images = app.session().watch_profile_image();

    let mut current = load_profile(app).await?;
    let initial = current.clone();

    let changes = emails
        .map(ProfileChange::Email)
        .merge(images.map(ProfileChange::Image))
        .filter_map(move |change| {
            let next = current.apply(change);
            if next == current {
                return None;
            }
            current = next.clone();
            Some(next)
        });

    Ok(stream::once(initial).chain(changes))
}

/// Signs the user out and drops the picture. The cart is kept.
pub async fn logout(app: &Storefront) -> ApiResult<()> {
    app.session().sign_out().await?;
    info!(session_id = %app.session_id(), "User logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add_to_cart, get_cart, submit_login};
    use huerto_core::LoginForm;

    const PHOTO: &str = "content://media/external/images/7";

    async fn signed_in() -> Storefront {
        let app = Storefront::in_memory().await.unwrap();
        let mut form = LoginForm::new();
        form.set_email("ana@huerto.cl");
        form.set_password("x");
        submit_login(&app, &mut form).await.unwrap();
        app
    }

    #[tokio::test]
    async fn test_load_profile() {
        let app = Storefront::in_memory().await.unwrap();
        assert!(!load_profile(&app).await.unwrap().is_signed_in());

        let app = signed_in().await;
        let profile = load_profile(&app).await.unwrap();
        assert_eq!(profile.user_email.as_deref(), Some("ana@huerto.cl"));
    }

    #[tokio::test]
    async fn test_logout_notifies_watchers_and_keeps_cart() {
        let app = signed_in().await;
        add_to_cart(&app, "FR001").unwrap();

        update_profile_image(&app, Some(PHOTO)).await.unwrap();

        let stream = watch_profile(&app).await.unwrap();
        tokio::pin!(stream);
        let first = stream.next().await.unwrap();
        assert!(first.is_signed_in());
        assert_eq!(first.profile_image_uri.as_deref(), Some(PHOTO));

        logout(&app).await.unwrap();
        let mut latest = stream.next().await.unwrap();
        if latest != Profile::default() {
            latest = stream.next().await.unwrap();
        }
        assert_eq!(latest, Profile::default());
        assert_eq!(load_profile(&app).await.unwrap(), Profile::default());
        assert_eq!(get_cart(&app).cart.item_count, 1);
    }

    #[tokio::test]
    async fn test_update_profile_image() {
        let app = signed_in().await;

        let profile = update_profile_image(&app, Some(PHOTO)).await.unwrap();
        assert_eq!(profile.user_email.as_deref(), Some("ana@huerto.cl"));
        assert_eq!(profile.profile_image_uri.as_deref(), Some(PHOTO));

        let profile = update_profile_image(&app, None).await.unwrap();
        assert_eq!(profile.profile_image_uri, None);
        assert!(profile.is_signed_in());
    }

    #[tokio::test]
    async fn test_watch_profile_sees_picture_change() {
        let app = signed_in().await;
        let stream = watch_profile(&app).await.unwrap();
        tokio::pin!(stream);
        assert_eq!(stream.next().await.unwrap().profile_image_uri, None);

        update_profile_image(&app, Some(PHOTO)).await.unwrap();
        let profile = stream.next().await.unwrap();
        assert_eq!(profile.profile_image_uri.as_deref(), Some(PHOTO));
        assert!(profile.is_signed_in());
    }
}
