//! # Queries and Envelopes
//!
//! Listing parameters the client sends and the wrappers the backend answers
//! with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductQuery ──► to_pairs() ──► ?page=1&per_page=12&sort_by=...        │
//! │                                                                         │
//! │  Backend envelopes:                                                     │
//! │    { success, message, data }                        ApiEnvelope<T>    │
//! │    { success, data: { items, pagination } }          Page<T>           │
//! │    { products, pagination }                          catalog::ProductPage│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Optional filters only appear in the query string when set; defaults are
//! always sent so the backend never has to guess.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ReviewStatusFilter;
use crate::error::{CoreError, CoreResult};
use crate::{
    ADMIN_REVIEWS_PER_PAGE, DEFAULT_BLOG_PER_PAGE, DEFAULT_PRODUCTS_PER_PAGE,
    DEFAULT_REVIEWS_PER_PAGE,
};

/// Ordered query-string pairs ready for URL encoding.
pub type QueryPairs = Vec<(&'static str, String)>;

// =============================================================================
// Sorting
// =============================================================================

/// Product listing sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    Name,
    #[default]
    CreatedAt,
}

impl SortField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "name" => Ok(SortField::Name),
            "created_at" => Ok(SortField::CreatedAt),
            other => Err(CoreError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::UnknownSortOrder(other.to_string())),
        }
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Filters for `GET /products`.
///
/// ## Example
/// ```rust
/// use hisi_core::{ProductQuery, SortField, SortOrder};
///
/// let query = ProductQuery::default()
///     .category("wheelchair-friendly")
///     .sort(SortField::Price, SortOrder::Asc);
///
/// let pairs = query.to_pairs();
/// assert_eq!(pairs[0], ("page", "1".to_string()));
/// assert!(pairs.contains(&("category", "wheelchair-friendly".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<String>,
    pub featured: bool,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PRODUCTS_PER_PAGE,
            category: None,
            featured: false,
            search: None,
            min_price: None,
            max_price: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ProductQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = field;
        self.sort_order = order;
        self
    }

    /// Rejects an inverted price range.
    pub fn validate(&self) -> CoreResult<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(CoreError::InvalidPriceRange { min, max });
            }
        }
        Ok(())
    }

    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort_by", self.sort_by.to_string()),
            ("sort_order", self.sort_order.to_string()),
        ];

        if let Some(category) = non_blank(&self.category) {
            pairs.push(("category", category));
        }
        if self.featured {
            pairs.push(("featured", "true".to_string()));
        }
        if let Some(search) = non_blank(&self.search) {
            pairs.push(("search", search));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }

        pairs
    }
}

// =============================================================================
// Review Queries
// =============================================================================

/// Filters for the public `GET /reviews` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub page: u32,
    pub per_page: u32,
    pub product_id: Option<String>,
    pub featured: bool,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_REVIEWS_PER_PAGE,
            product_id: None,
            featured: false,
        }
    }
}

impl ReviewQuery {
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(product_id) = non_blank(&self.product_id) {
            pairs.push(("product_id", product_id));
        }
        if self.featured {
            pairs.push(("featured", "true".to_string()));
        }
        pairs
    }
}

/// Filters for the admin moderation queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminReviewQuery {
    pub page: u32,
    pub per_page: u32,
    pub status: ReviewStatusFilter,
}

impl Default for AdminReviewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: ADMIN_REVIEWS_PER_PAGE,
            status: ReviewStatusFilter::All,
        }
    }
}

impl AdminReviewQuery {
    pub fn to_pairs(&self) -> QueryPairs {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("status", self.status.to_string()),
        ]
    }
}

// =============================================================================
// Blog Query
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_BLOG_PER_PAGE,
            category: None,
            search: None,
        }
    }
}

impl BlogQuery {
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(category) = non_blank(&self.category) {
            pairs.push(("category", category));
        }
        if let Some(search) = non_blank(&self.search) {
            pairs.push(("search", search));
        }
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// The backend's standard `{success, message, data}` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    pub data: T,
}

fn default_success() -> bool {
    true
}

/// Pagination metadata.
///
/// The product listing names the total `total_items`; everything else uses
/// `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    #[serde(alias = "total_items", default)]
    pub total: u64,
    #[serde(alias = "pages", default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

impl Pagination {
    /// Metadata for a single unpaginated batch.
    pub fn single(page: u32, per_page: u32, len: usize) -> Self {
        Self {
            page,
            per_page,
            total: len as u64,
            total_pages: if len == 0 { 0 } else { 1 },
            has_next: false,
            has_prev: page > 1,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::single(page, per_page, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Listing `data` that is either a paginated object or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageOrList<T> {
    Page(Page<T>),
    List(Vec<T>),
}

impl<T> PageOrList<T> {
    pub fn into_page(self, page: u32, per_page: u32) -> Page<T> {
        match self {
            PageOrList::Page(p) => p,
            PageOrList::List(items) => {
                let pagination = Pagination::single(page, per_page, items.len());
                Page { items, pagination }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
