//! # Backend Resources
//!
//! One borrowed handle per backend resource, obtained from [`ApiClient`].
//!
//! ```text
//! ┌────────────────┬──────────────────────────────┬──────────────┐
//! │ Handle         │ Endpoints                    │ Auth         │
//! ├────────────────┼──────────────────────────────┼──────────────┤
//! │ products()     │ /products, /products/slug/…  │ admin writes │
//! │ reviews()      │ /reviews, /admin/reviews     │ submit/admin │
//! │ press()        │ /press/…, /admin/press/…     │ admin writes │
//! │ blog()         │ /blog, /blog/categories      │ public       │
//! │ contact()      │ /contact, /consultations, …  │ public       │
//! │ newsletter()   │ /newsletter/(un)subscribe    │ public       │
//! │ cms()          │ /pages, /section-content, …  │ admin writes │
//! └────────────────┴──────────────────────────────┴──────────────┘
//! ```
//!
//! Handles are stateless. No call is cached, retried or batched.

pub mod blog;
pub mod cms;
pub mod contact;
pub mod newsletter;
pub mod press;
pub mod products;
pub mod reviews;

pub use blog::{BlogApi, BlogListing};
pub use cms::CmsApi;
pub use contact::ContactApi;
pub use newsletter::NewsletterApi;
pub use press::{PressApi, PressItem};
pub use products::ProductsApi;
pub use reviews::ReviewsApi;

use tracing::warn;

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

impl ApiClient {
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi::new(self)
    }

    pub fn press(&self) -> PressApi<'_> {
        PressApi::new(self)
    }

    pub fn blog(&self) -> BlogApi<'_> {
        BlogApi::new(self)
    }

    pub fn contact(&self) -> ContactApi<'_> {
        ContactApi::new(self)
    }

    pub fn newsletter(&self) -> NewsletterApi<'_> {
        NewsletterApi::new(self)
    }

    pub fn cms(&self) -> CmsApi<'_> {
        CmsApi::new(self)
    }
}

/// `message` of a response body, or `default`.
pub(crate) fn message_or(body: &serde_json::Value, default: &str) -> String {
    body.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Turns a backend rejection into `T::default()`; network failures still propagate.
pub(crate) fn default_on_rejection<T: Default>(result: ClientResult<T>, what: &str) -> ClientResult<T> {
    match result {
        Err(ClientError::Api { status, message }) => {
            warn!(status, message = %message, "{} unavailable, using empty result", what);
            Ok(T::default())
        }
        other => other,
    }
}
