//! Gone command handlers.
//!
//! `gone` exists in two scopes:
//! - **public**: marks every open pot as gone and pings the brew master
//! - **private**: only sympathizes, the pots are left untouched

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{
    Context,
    brew_response::{format_coffee_gone, format_make_more_coffee},
    registry::HandlerResult,
};

/// Marks every open brew as gone.
pub fn gone(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling gone command");

        for mut brew in context.brews.find_open().await? {
            brew.gone = true;
            context.brews.save(brew).await?;
        }

        Ok(Some(context.reply(format_make_more_coffee(
            &context.brew_master.mention(),
        ))))
    }
    .boxed()
}

/// Sympathizes without touching any brew.
pub fn gone_private(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling private gone command");

        Ok(Some(context.reply(format_coffee_gone())))
    }
    .boxed()
}
