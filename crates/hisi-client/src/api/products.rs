//! Product catalogue: listing, lookup, categories and admin writes.
//!
//! The product endpoints answer with bare objects (`{products, pagination}`,
//! `{product}`, `{categories}`) rather than the `{success, data}` envelope.

use hisi_core::catalog::{Category, CategoryList, Product, ProductDraft, ProductEnvelope, ProductPage};
use hisi_core::validation::validate_search_query;
use hisi_core::{ProductQuery, FEATURED_PRODUCTS_LIMIT};
use http::Method;
use tracing::info;

use super::message_or;
use crate::client::ApiClient;
use crate::error::ClientResult;

pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /products` with the query's filters.
    pub async fn list(&self, query: &ProductQuery) -> ClientResult<ProductPage> {
        query.validate()?;
        self.client
            .public(Method::GET, &["products"])
            .query(query.to_pairs())
            .fallback("Failed to fetch products")
            .fetch()
            .await
    }

    /// First `limit` featured products ([`FEATURED_PRODUCTS_LIMIT`] by default).
    pub async fn featured(&self, limit: Option<u32>) -> ClientResult<Vec<Product>> {
        let query = ProductQuery::default()
            .featured(true)
            .per_page(limit.unwrap_or(FEATURED_PRODUCTS_LIMIT));
        Ok(self.list(&query).await?.products)
    }

    pub async fn get(&self, id: &str) -> ClientResult<Product> {
        let envelope: ProductEnvelope = self
            .client
            .public(Method::GET, &["products", id])
            .fallback("Product not found")
            .fetch()
            .await?;
        Ok(envelope.product)
    }

    pub async fn by_slug(&self, slug: &str) -> ClientResult<Product> {
        let envelope: ProductEnvelope = self
            .client
            .public(Method::GET, &["products", "slug", slug])
            .fallback("Product not found")
            .fetch()
            .await?;
        Ok(envelope.product)
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        let list: CategoryList = self
            .client
            .public(Method::GET, &["products", "categories"])
            .fallback("Failed to fetch categories")
            .fetch()
            .await?;
        Ok(list.categories)
    }

    /// `list` restricted to one category; other filters come from `query`.
    pub async fn by_category(&self, slug: &str, query: ProductQuery) -> ClientResult<ProductPage> {
        self.list(&query.category(slug)).await
    }

    /// `list` with a free-text search term (trimmed, at most 100 characters).
    pub async fn search(&self, text: &str, query: ProductQuery) -> ClientResult<ProductPage> {
        let text = validate_search_query(text)?;
        self.list(&query.search(text)).await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Requires name, slug, price and sku.
    pub async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        draft.validate_for_create()?;
        let envelope: ProductEnvelope = self
            .client
            .authenticated(Method::POST, &["products"])
            .await?
            .json(draft)
            .fallback("Failed to create product")
            .fetch()
            .await?;

        info!(product_id = %envelope.product.id, "Product created");
        Ok(envelope.product)
    }

    /// Sends only the fields set on `draft`.
    pub async fn update(&self, id: &str, draft: &ProductDraft) -> ClientResult<Product> {
        let envelope: ProductEnvelope = self
            .client
            .authenticated(Method::PUT, &["products", id])
            .await?
            .json(draft)
            .fallback("Failed to update product")
            .fetch()
            .await?;

        info!(product_id = %id, "Product updated");
        Ok(envelope.product)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<String> {
        let body: serde_json::Value = self
            .client
            .authenticated(Method::DELETE, &["products", id])
            .await?
            .fallback("Failed to delete product")
            .fetch()
            .await?;

        info!(product_id = %id, "Product deleted");
        Ok(message_or(&body, "Product deleted successfully"))
    }
}
