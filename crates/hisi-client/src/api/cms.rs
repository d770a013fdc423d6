//! # CMS Content
//!
//! Static pages, editable page sections, site settings and collections.
//!
//! ```text
//! page_sections("home")          section("home", "hero")
//! ┌────────────────────────┐     ┌────────────────────────┐
//! │ hero:  { title, cta }  │     │ title: "Fashion for…"  │
//! │ story: { body, image } │     │ cta:   "Shop now"      │
//! └────────────────────────┘     └────────────────────────┘
//! ```
//!
//! Read paths degrade to empty values when the backend refuses, so pages can
//! fall back to their built-in copy.

use std::collections::BTreeMap;

use hisi_core::catalog::{Category, CategoryList};
use hisi_core::content::{AdminSections, BulkUpdateResult, CmsPage, SectionContent, SectionMap, SectionValueUpdate};
use http::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{default_on_rejection, message_or};
use crate::client::ApiClient;
use crate::error::ClientResult;

/// `section → key → value` for one page.
pub type PageSections = BTreeMap<String, SectionMap>;

/// `/collections` has answered in all three shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionsPayload {
    Envelope { data: Vec<Category> },
    Categories(CategoryList),
    List(Vec<Category>),
}

impl CollectionsPayload {
    fn into_vec(self) -> Vec<Category> {
        match self {
            CollectionsPayload::Envelope { data } => data,
            CollectionsPayload::Categories(list) => list.categories,
            CollectionsPayload::List(list) => list,
        }
    }
}

#[derive(Serialize)]
struct BulkUpdate<'a> {
    items: &'a [SectionValueUpdate],
}

pub struct CmsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CmsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn page_by_slug(&self, slug: &str) -> ClientResult<CmsPage> {
        self.client
            .public(Method::GET, &["pages", slug])
            .fallback("Page not found")
            .fetch_data()
            .await
    }

    pub async fn published_pages(&self) -> ClientResult<Vec<CmsPage>> {
        let result = self.client.public(Method::GET, &["pages"]).fetch_data().await;
        default_on_rejection(result, "pages")
    }

    /// All sections of `page`; empty when the backend refuses.
    pub async fn page_sections(&self, page: &str) -> ClientResult<PageSections> {
        let result = self
            .client
            .public(Method::GET, &["section-content", page])
            .fetch_data()
            .await;
        default_on_rejection(result, "page sections")
    }

    /// One section's `key → value` map; empty when the backend refuses.
    pub async fn section(&self, page: &str, section: &str) -> ClientResult<SectionMap> {
        let result = self
            .client
            .public(Method::GET, &["section-content", page, section])
            .fetch_data()
            .await;
        default_on_rejection(result, "section")
    }

    pub async fn site_settings(&self) -> ClientResult<BTreeMap<String, serde_json::Value>> {
        let result = self.client.public(Method::GET, &["settings"]).fetch_data().await;
        default_on_rejection(result, "site settings")
    }

    /// `/collections`, else the product categories, else nothing.
    /// Network failures are returned as-is.
    pub async fn collections(&self) -> ClientResult<Vec<Category>> {
        let dedicated = self
            .client
            .public(Method::GET, &["collections"])
            .fetch::<CollectionsPayload>()
            .await;

        match dedicated {
            Ok(payload) => Ok(payload.into_vec()),
            Err(e) if e.is_network_error() => Err(e),
            Err(e) => {
                debug!(error = %e, "Collections endpoint unavailable, using product categories");
                default_on_rejection(self.client.products().categories().await, "categories")
            }
        }
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Every section item, optionally for one page, grouped and flat.
    pub async fn admin_sections(&self, page: Option<&str>) -> ClientResult<AdminSections> {
        let mut request = self
            .client
            .authenticated(Method::GET, &["admin", "section-content"])
            .await?
            .fallback("Failed to fetch section content");
        if let Some(page) = page {
            request = request.param("page_name", page);
        }
        request.fetch_data().await
    }

    pub async fn create_section(&self, item: &SectionContent) -> ClientResult<SectionContent> {
        item.validate()?;
        let created: SectionContent = self
            .client
            .authenticated(Method::POST, &["admin", "section-content"])
            .await?
            .json(item)
            .fallback("Failed to create section content")
            .fetch_data()
            .await?;

        info!(
            page = %created.page_name,
            section = %created.section_name,
            key = %created.content_key,
            "Section content created"
        );
        Ok(created)
    }

    pub async fn update_section(&self, id: &str, item: &SectionContent) -> ClientResult<SectionContent> {
        let updated = self
            .client
            .authenticated(Method::PUT, &["admin", "section-content", id])
            .await?
            .json(item)
            .fallback("Failed to update section content")
            .fetch_data()
            .await?;

        info!(id, "Section content updated");
        Ok(updated)
    }

    pub async fn delete_section(&self, id: &str) -> ClientResult<String> {
        let body: serde_json::Value = self
            .client
            .authenticated(Method::DELETE, &["admin", "section-content", id])
            .await?
            .fallback("Failed to delete section content")
            .fetch()
            .await?;

        info!(id, "Section content deleted");
        Ok(message_or(&body, "Section content deleted"))
    }

    /// Updates many values in one request; unknown ids are skipped server-side.
    pub async fn bulk_update_sections(&self, items: &[SectionValueUpdate]) -> ClientResult<BulkUpdateResult> {
        let result: BulkUpdateResult = self
            .client
            .authenticated(Method::PUT, &["admin", "section-content", "bulk"])
            .await?
            .json(&BulkUpdate { items })
            .fallback("Failed to update section content")
            .fetch_data()
            .await?;

        info!(requested = items.len(), updated = result.updated_count, "Bulk section update");
        Ok(result)
    }
}
