//! # Catalog
//!
//! Products, categories and customer reviews.
//!
//! ```text
//! ┌─────────────────┐       ┌─────────────────┐       ┌─────────────────┐
//! │    Category     │ 1   * │     Product     │ 1   * │     Review      │
//! │  slug, order    │◄──────│  price, stock   │◄──────│  rating 1..=5   │
//! └─────────────────┘       │  images         │       │  is_approved    │
//!                           └─────────────────┘       └─────────────────┘
//! ```
//!
//! Reviews are created unapproved; only an admin moderation call makes them
//! public.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;
use crate::query::Pagination;
use crate::validation::{require, validate_rating, ValidationResult};
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImages {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub hover: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// A product as listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,

    /// Decimal price in `currency`.
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<u32>,
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub low_stock: bool,

    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub accessibility_features: Option<serde_json::Value>,

    #[serde(default)]
    pub images: ProductImages,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn price_money(&self) -> Money {
        Money::from_decimal(self.price)
    }

    pub fn original_price_money(&self) -> Option<Money> {
        self.original_price.map(Money::from_decimal)
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Discount as reported by the backend, else derived from the prices.
    pub fn discount(&self) -> Option<u32> {
        self.discount_percentage.or_else(|| {
            self.original_price_money()
                .and_then(|original| self.price_money().discount_from(original))
        })
    }

    /// e.g. `"KES 4,599.99"`.
    pub fn display_price(&self) -> String {
        self.price_money().format(self.currency())
    }
}

/// `GET /products` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Admin create/update body. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ProductDraft {
    /// Creation needs name, slug, price and sku.
    pub fn validate_for_create(&self) -> ValidationResult<()> {
        require("name", self.name.as_deref().unwrap_or(""))?;
        require("slug", self.slug.as_deref().unwrap_or(""))?;
        require("sku", self.sku.as_deref().unwrap_or(""))?;
        if self.price.is_none() {
            return Err(crate::ValidationError::Required {
                field: "price".to_string(),
            });
        }
        Ok(())
    }
}

/// `{product: {...}}` wrapper used by the single-product endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProduct {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
    #[serde(default)]
    pub product: Option<ReviewProduct>,
}

/// Aggregate over approved reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_reviews: u64,
    pub average_rating: f64,
    /// Star count → number of reviews. Keys arrive as strings.
    #[serde(default)]
    pub rating_distribution: BTreeMap<u8, u64>,
}

/// Body of `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub product_id: Option<String>,
}

impl NewReview {
    pub fn new(rating: u8, content: impl Into<String>) -> Self {
        Self {
            rating,
            title: None,
            content: content.into(),
            product_id: None,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_rating(self.rating)?;
        require("content", &self.content)?;
        Ok(())
    }
}

impl Default for NewReview {
    fn default() -> Self {
        Self::new(5, "")
    }
}

/// Body of `PUT /admin/reviews/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

/// Moderation queue filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatusFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl ReviewStatusFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReviewStatusFilter::All => "all",
            ReviewStatusFilter::Pending => "pending",
            ReviewStatusFilter::Approved => "approved",
        }
    }
}

impl fmt::Display for ReviewStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ReviewStatusFilter::All),
            "pending" => Ok(ReviewStatusFilter::Pending),
            "approved" => Ok(ReviewStatusFilter::Approved),
            other => Err(CoreError::UnknownReviewStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
