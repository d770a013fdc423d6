//! Product catalogue commands.

use hisi_core::catalog::{Product, ProductPage};
use hisi_core::ProductQuery;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::output;
use crate::cli::ProductsCommand;
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, command: ProductsCommand) -> CommandResult<Value> {
    let products = ctx.client.products();

    match command {
        ProductsCommand::List {
            listing,
            category,
            featured,
            search,
            min_price,
            max_price,
            sort,
            order,
        } => {
            let mut query = ProductQuery::default()
                .page(listing.page)
                .featured(featured)
                .price_range(min_price, max_price)
                .sort(sort, order);
            if let Some(per_page) = listing.per_page {
                query = query.per_page(per_page);
            }
            if let Some(category) = category {
                query = query.category(category);
            }

            let page = match search {
                Some(text) => products.search(&text, query).await?,
                None => products.list(&query).await?,
            };
            debug!(count = page.products.len(), total = page.pagination.total, "Products listed");
            output(&PricedPage::from(&page))
        }
        ProductsCommand::Show { key, id } => {
            let product = if id {
                products.get(&key).await?
            } else {
                products.by_slug(&key).await?
            };
            output(&PricedProduct::from(&product))
        }
        ProductsCommand::Featured { limit } => {
            let featured = products.featured(limit).await?;
            output(&featured.iter().map(PricedProduct::from).collect::<Vec<_>>())
        }
        ProductsCommand::Categories => output(&products.categories().await?),
    }
}

/// A product plus its formatted price and effective discount.
#[derive(Serialize)]
struct PricedProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    display_price: String,
    discount: Option<u32>,
}

impl<'a> From<&'a Product> for PricedProduct<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            display_price: product.display_price(),
            discount: product.discount(),
        }
    }
}

#[derive(Serialize)]
struct PricedPage<'a> {
    products: Vec<PricedProduct<'a>>,
    pagination: &'a hisi_core::Pagination,
}

impl<'a> From<&'a ProductPage> for PricedPage<'a> {
    fn from(page: &'a ProductPage) -> Self {
        Self {
            products: page.products.iter().map(PricedProduct::from).collect(),
            pagination: &page.pagination,
        }
    }
}
