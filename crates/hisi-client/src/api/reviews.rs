//! Customer reviews and admin moderation.

use hisi_core::catalog::{NewReview, Review, ReviewStats, ReviewUpdate};
use hisi_core::{AdminReviewQuery, Page, ReviewQuery};
use http::Method;
use tracing::info;

use super::message_or;
use crate::client::ApiClient;
use crate::error::ClientResult;

pub struct ReviewsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Approved reviews, newest first.
    pub async fn list(&self, query: &ReviewQuery) -> ClientResult<Page<Review>> {
        self.client
            .public(Method::GET, &["reviews"])
            .query(query.to_pairs())
            .fallback("Failed to fetch reviews")
            .fetch_data()
            .await
    }

    /// Site-wide stats, or one product's when `product_id` is given.
    pub async fn stats(&self, product_id: Option<&str>) -> ClientResult<ReviewStats> {
        let mut request = self
            .client
            .public(Method::GET, &["reviews", "stats"])
            .fallback("Failed to fetch review stats");
        if let Some(id) = product_id {
            request = request.param("product_id", id);
        }
        request.fetch_data().await
    }

    /// Submits a review for moderation. Needs a signed-in user.
    pub async fn submit(&self, review: &NewReview) -> ClientResult<Review> {
        review.validate()?;
        let created: Review = self
            .client
            .authenticated(Method::POST, &["reviews"])
            .await?
            .json(review)
            .fallback("Failed to submit review")
            .fetch_data()
            .await?;

        info!(review_id = %created.id, rating = created.rating, "Review submitted");
        Ok(created)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn admin_list(&self, query: &AdminReviewQuery) -> ClientResult<Page<Review>> {
        self.client
            .authenticated(Method::GET, &["admin", "reviews"])
            .await?
            .query(query.to_pairs())
            .fallback("Failed to fetch reviews")
            .fetch_data()
            .await
    }

    /// Approve, feature or annotate a review.
    pub async fn moderate(&self, id: &str, update: &ReviewUpdate) -> ClientResult<Review> {
        let review: Review = self
            .client
            .authenticated(Method::PUT, &["admin", "reviews", id])
            .await?
            .json(update)
            .fallback("Failed to update review")
            .fetch_data()
            .await?;

        info!(review_id = %id, approved = review.is_approved, featured = review.is_featured, "Review moderated");
        Ok(review)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<String> {
        let body: serde_json::Value = self
            .client
            .authenticated(Method::DELETE, &["admin", "reviews", id])
            .await?
            .fallback("Failed to delete review")
            .fetch()
            .await?;

        info!(review_id = %id, "Review deleted");
        Ok(message_or(&body, "Review deleted successfully"))
    }
}
