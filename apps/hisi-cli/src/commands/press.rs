//! Press page views.

use serde_json::Value;

use super::output;
use crate::cli::PressView;
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, view: PressView) -> CommandResult<Value> {
    let press = ctx.client.press();

    match view {
        PressView::Page => output(&press.page().await?),
        PressView::Coverage => output(&press.media_coverage().await?),
        PressView::Exhibitions => output(&press.exhibitions().await?),
        PressView::Releases => output(&press.releases().await?),
    }
}
