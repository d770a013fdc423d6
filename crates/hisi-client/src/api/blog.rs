//! Blog posts and categories.

use hisi_core::content::{BlogCategory, BlogPost};
use hisi_core::validation::validate_search_query;
use hisi_core::{BlogQuery, Page, PageOrList, DEFAULT_BLOG_PER_PAGE, FEATURED_BLOG_LIMIT, MIN_BLOG_SEARCH_LEN};
use http::Method;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

/// One page of posts, whichever shape the backend used.
pub type BlogListing = Page<BlogPost>;

pub struct BlogApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BlogApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Published posts. A backend rejection yields an empty listing.
    pub async fn list(&self, query: &BlogQuery) -> ClientResult<BlogListing> {
        let result = self
            .client
            .public(Method::GET, &["blog"])
            .query(query.to_pairs())
            .fallback("Failed to fetch blog posts")
            .fetch_data::<PageOrList<BlogPost>>()
            .await;

        match result {
            Ok(payload) => Ok(payload.into_page(query.page, query.per_page)),
            Err(ClientError::Api { status, message }) => {
                warn!(status, message = %message, "Blog listing unavailable");
                Ok(Page::empty(query.page, query.per_page))
            }
            Err(e) => Err(e),
        }
    }

    /// Full post including `content`.
    pub async fn by_slug(&self, slug: &str) -> ClientResult<BlogPost> {
        self.client
            .public(Method::GET, &["blog", slug])
            .fallback("Blog post not found")
            .fetch_data()
            .await
    }

    /// Latest `limit` posts ([`FEATURED_BLOG_LIMIT`] by default).
    pub async fn featured(&self, limit: Option<u32>) -> ClientResult<Vec<BlogPost>> {
        let limit = limit.unwrap_or(FEATURED_BLOG_LIMIT).max(1);
        let query = BlogQuery {
            per_page: limit,
            ..BlogQuery::default()
        };

        let mut posts = self.list(&query).await?.items;
        posts.truncate(limit as usize);
        Ok(posts)
    }

    /// Falls back to the four built-in categories on any failure.
    pub async fn categories(&self) -> Vec<BlogCategory> {
        let result = self
            .client
            .public(Method::GET, &["blog", "categories"])
            .fetch_data::<Vec<BlogCategory>>()
            .await;

        match result {
            Ok(categories) => categories,
            Err(e) => {
                debug!(error = %e, "Blog categories endpoint unavailable, using defaults");
                BlogCategory::defaults()
            }
        }
    }

    /// Searches titles and bodies. Terms shorter than two characters
    /// return an empty listing without a request.
    pub async fn search(&self, text: &str) -> ClientResult<BlogListing> {
        if text.trim().chars().count() < MIN_BLOG_SEARCH_LEN {
            return Ok(Page::empty(1, DEFAULT_BLOG_PER_PAGE));
        }

        let query = BlogQuery {
            search: Some(validate_search_query(text)?),
            ..BlogQuery::default()
        };
        self.list(&query).await
    }
}
