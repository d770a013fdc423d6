//! Blog commands.

use hisi_core::BlogQuery;
use serde_json::Value;

use super::output;
use crate::cli::BlogCommand;
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, command: BlogCommand) -> CommandResult<Value> {
    let blog = ctx.client.blog();

    match command {
        BlogCommand::List { listing, category } => {
            let mut query = BlogQuery {
                page: listing.page.max(1),
                category,
                ..BlogQuery::default()
            };
            if let Some(per_page) = listing.per_page {
                query.per_page = per_page.max(1);
            }
            output(&blog.list(&query).await?)
        }
        BlogCommand::Show { slug } => output(&blog.by_slug(&slug).await?),
        BlogCommand::Search { text } => output(&blog.search(&text).await?),
        BlogCommand::Featured { limit } => output(&blog.featured(limit).await?),
        BlogCommand::Categories => output(&blog.categories().await),
    }
}
