//! # Press Content
//!
//! Public press page plus admin editing of every press collection.
//!
//! ```text
//! /press                         → PressPage (one aggregated payload)
//! /press/{media-coverage, exhibitions, releases}
//! /admin/press/<collection>[/<id>]   GET list · POST · PUT · DELETE
//! /admin/press/{hero, contact}       GET · PUT
//! /admin/press/media-kit             GET {config, items}
//! /admin/press/media-kit/config      PUT
//! /admin/press/media-kit/items[/<id>] POST · PUT · DELETE
//! ```

use hisi_core::content::{
    Collaboration, Exhibition, MediaCoverage, MediaKit, MediaKitConfig, MediaKitItem,
    PressContact, PressHero, PressPage, PressRelease, SpeakingEngagement,
};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::{default_on_rejection, message_or};
use crate::client::ApiClient;
use crate::error::ClientResult;

/// A press collection editable through `/admin/press/<COLLECTION>`.
pub trait PressItem: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
    /// Human-readable name for messages and logs.
    const LABEL: &'static str;
}

impl PressItem for MediaCoverage {
    const COLLECTION: &'static str = "media-coverage";
    const LABEL: &'static str = "media coverage";
}

impl PressItem for PressRelease {
    const COLLECTION: &'static str = "releases";
    const LABEL: &'static str = "press release";
}

impl PressItem for Exhibition {
    const COLLECTION: &'static str = "exhibitions";
    const LABEL: &'static str = "exhibition";
}

impl PressItem for SpeakingEngagement {
    const COLLECTION: &'static str = "speaking-engagements";
    const LABEL: &'static str = "speaking engagement";
}

impl PressItem for Collaboration {
    const COLLECTION: &'static str = "collaborations";
    const LABEL: &'static str = "collaboration";
}

pub struct PressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PressApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // Public
    // =========================================================================

    /// Whole press page; absent blocks decode to their defaults.
    pub async fn page(&self) -> ClientResult<PressPage> {
        self.client
            .public(Method::GET, &["press"])
            .fallback("Failed to fetch press content")
            .fetch_data()
            .await
    }

    /// Published coverage; empty when the backend refuses.
    pub async fn media_coverage(&self) -> ClientResult<Vec<MediaCoverage>> {
        self.public_list("media-coverage").await
    }

    pub async fn exhibitions(&self) -> ClientResult<Vec<Exhibition>> {
        self.public_list("exhibitions").await
    }

    pub async fn releases(&self) -> ClientResult<Vec<PressRelease>> {
        self.public_list("releases").await
    }

    async fn public_list<T: DeserializeOwned + Default>(&self, collection: &str) -> ClientResult<T> {
        let result = self
            .client
            .public(Method::GET, &["press", collection])
            .fetch_data()
            .await;
        default_on_rejection(result, collection)
    }

    // =========================================================================
    // Admin: collections
    // =========================================================================

    /// Every item of `T`'s collection, published or not.
    pub async fn admin_list<T: PressItem>(&self) -> ClientResult<Vec<T>> {
        self.client
            .authenticated(Method::GET, &["admin", "press", T::COLLECTION])
            .await?
            .fallback(format!("Failed to fetch {}", T::LABEL))
            .fetch_data()
            .await
    }

    pub async fn admin_create<T: PressItem>(&self, item: &T) -> ClientResult<T> {
        let created = self
            .client
            .authenticated(Method::POST, &["admin", "press", T::COLLECTION])
            .await?
            .json(item)
            .fallback(format!("Failed to create {}", T::LABEL))
            .fetch_data()
            .await?;

        info!(collection = T::COLLECTION, "Press item created");
        Ok(created)
    }

    pub async fn admin_update<T: PressItem>(&self, id: &str, item: &T) -> ClientResult<T> {
        let updated = self
            .client
            .authenticated(Method::PUT, &["admin", "press", T::COLLECTION, id])
            .await?
            .json(item)
            .fallback(format!("Failed to update {}", T::LABEL))
            .fetch_data()
            .await?;

        info!(collection = T::COLLECTION, id, "Press item updated");
        Ok(updated)
    }

    pub async fn admin_delete<T: PressItem>(&self, id: &str) -> ClientResult<String> {
        self.delete(&["admin", "press", T::COLLECTION, id], T::LABEL).await
    }

    // =========================================================================
    // Admin: singletons
    // =========================================================================

    /// `None` until a hero has been saved.
    pub async fn hero(&self) -> ClientResult<Option<PressHero>> {
        self.client
            .authenticated(Method::GET, &["admin", "press", "hero"])
            .await?
            .fallback("Failed to fetch press hero")
            .fetch_data()
            .await
    }

    pub async fn update_hero(&self, hero: &PressHero) -> ClientResult<PressHero> {
        let saved = self
            .client
            .authenticated(Method::PUT, &["admin", "press", "hero"])
            .await?
            .json(hero)
            .fallback("Failed to update press hero")
            .fetch_data()
            .await?;
        info!("Press hero updated");
        Ok(saved)
    }

    pub async fn contact(&self) -> ClientResult<Option<PressContact>> {
        self.client
            .authenticated(Method::GET, &["admin", "press", "contact"])
            .await?
            .fallback("Failed to fetch press contact")
            .fetch_data()
            .await
    }

    pub async fn update_contact(&self, contact: &PressContact) -> ClientResult<PressContact> {
        let saved = self
            .client
            .authenticated(Method::PUT, &["admin", "press", "contact"])
            .await?
            .json(contact)
            .fallback("Failed to update press contact")
            .fetch_data()
            .await?;
        info!("Press contact updated");
        Ok(saved)
    }

    // =========================================================================
    // Admin: media kit
    // =========================================================================

    pub async fn media_kit(&self) -> ClientResult<MediaKit> {
        self.client
            .authenticated(Method::GET, &["admin", "press", "media-kit"])
            .await?
            .fallback("Failed to fetch media kit")
            .fetch_data()
            .await
    }

    pub async fn update_media_kit_config(&self, config: &MediaKitConfig) -> ClientResult<MediaKitConfig> {
        self.client
            .authenticated(Method::PUT, &["admin", "press", "media-kit", "config"])
            .await?
            .json(config)
            .fallback("Failed to update media kit config")
            .fetch_data()
            .await
    }

    pub async fn create_media_kit_item(&self, item: &MediaKitItem) -> ClientResult<MediaKitItem> {
        self.client
            .authenticated(Method::POST, &["admin", "press", "media-kit", "items"])
            .await?
            .json(item)
            .fallback("Failed to create media kit item")
            .fetch_data()
            .await
    }

    pub async fn update_media_kit_item(&self, id: &str, item: &MediaKitItem) -> ClientResult<MediaKitItem> {
        self.client
            .authenticated(Method::PUT, &["admin", "press", "media-kit", "items", id])
            .await?
            .json(item)
            .fallback("Failed to update media kit item")
            .fetch_data()
            .await
    }

    pub async fn delete_media_kit_item(&self, id: &str) -> ClientResult<String> {
        self.delete(&["admin", "press", "media-kit", "items", id], "media kit item")
            .await
    }

    async fn delete(&self, segments: &[&str], label: &str) -> ClientResult<String> {
        let body: serde_json::Value = self
            .client
            .authenticated(Method::DELETE, segments)
            .await?
            .fallback(format!("Failed to delete {}", label))
            .fetch()
            .await?;

        info!(path = %segments.join("/"), "Press item deleted");
        Ok(message_or(&body, "Deleted"))
    }
}
