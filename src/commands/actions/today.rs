//! Today command handler.
//!
//! Lists the pots brewed during the last 12 hours, among the most recent ones.

use chrono::Duration;
use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{
    Context,
    actions::RECENT_BREWS_LIMIT,
    brew_response::{format_brews, format_nothing_brewed_today},
    registry::HandlerResult,
};

/// How far back "today" reaches.
const TODAY_WINDOW_HOURS: i64 = 12;

/// Lists today's brews, or nudges the brew master when there are none.
pub fn today(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling today command");

        let since = context.now - Duration::hours(TODAY_WINDOW_HOURS);
        let brews = context.brews.find_recent(RECENT_BREWS_LIMIT).await?;

        let text = format_brews(
            brews.iter().filter(|brew| brew.brewed_at > since),
            &context.utc_offset,
            format_nothing_brewed_today(&context.brew_master.mention()),
        );

        Ok(Some(context.reply(text)))
    }
    .boxed()
}
