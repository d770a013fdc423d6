//! Public review commands.

use hisi_core::catalog::NewReview;
use hisi_core::ReviewQuery;
use serde_json::Value;

use super::output;
use crate::cli::ReviewsCommand;
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, command: ReviewsCommand) -> CommandResult<Value> {
    let reviews = ctx.client.reviews();

    match command {
        ReviewsCommand::List {
            listing,
            product,
            featured,
        } => {
            let mut query = ReviewQuery {
                page: listing.page.max(1),
                product_id: product,
                featured,
                ..ReviewQuery::default()
            };
            if let Some(per_page) = listing.per_page {
                query.per_page = per_page.max(1);
            }
            output(&reviews.list(&query).await?)
        }
        ReviewsCommand::Stats { product } => output(&reviews.stats(product.as_deref()).await?),
        ReviewsCommand::Submit {
            rating,
            content,
            title,
            product,
        } => {
            let review = NewReview {
                title,
                product_id: product,
                ..NewReview::new(rating, content)
            };
            output(&reviews.submit(&review).await?)
        }
    }
}
