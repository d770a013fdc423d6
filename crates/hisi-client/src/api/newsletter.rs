//! Newsletter subscription.

use hisi_core::content::{NewsletterRequest, NewsletterSubscriber};
use http::Method;
use tracing::info;

use super::message_or;
use crate::client::ApiClient;
use crate::error::ClientResult;

pub struct NewsletterApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NewsletterApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Subscribes (or re-subscribes) `email`, normalised to lower case.
    pub async fn subscribe(&self, email: &str) -> ClientResult<NewsletterSubscriber> {
        let body = NewsletterRequest::new(email)?;
        let subscriber: NewsletterSubscriber = self
            .client
            .public(Method::POST, &["newsletter", "subscribe"])
            .json(&body)
            .fallback("Failed to subscribe")
            .fetch_data()
            .await?;

        info!(subscriber_id = %subscriber.id, "Newsletter subscription recorded");
        Ok(subscriber)
    }

    /// Returns the backend's confirmation message.
    pub async fn unsubscribe(&self, email: &str) -> ClientResult<String> {
        let body = NewsletterRequest::new(email)?;
        let response: serde_json::Value = self
            .client
            .public(Method::POST, &["newsletter", "unsubscribe"])
            .json(&body)
            .fallback("Failed to unsubscribe")
            .fetch()
            .await?;

        info!("Newsletter unsubscription recorded");
        Ok(message_or(&response, "Successfully unsubscribed from newsletter"))
    }
}
