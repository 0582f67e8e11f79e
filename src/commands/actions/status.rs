//! Status handler, bound to the bare command.
//!
//! Tells how long ago the latest pot was brewed, and by whom.

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{
    Context,
    brew_response::{format_nothing_brewed, format_status},
    registry::HandlerResult,
};

/// Reports the latest brew.
///
/// Minutes are counted as whole elapsed minutes between the brew time and
/// the dispatch time.
pub fn status(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling status command");

        let Some(latest) = context.brews.find_recent(1).await?.into_iter().next() else {
            return Ok(Some(context.reply(format_nothing_brewed())));
        };

        let minutes = context.now.timestamp() / 60 - latest.brewed_at.timestamp() / 60;

        Ok(Some(context.reply(format_status(&latest, minutes))))
    }
    .boxed()
}
