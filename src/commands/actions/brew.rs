//! Brew command handlers.
//!
//! `brew` exists in two scopes:
//! - **public**: records the pot and announces it to the channel
//! - **private**: only compliments the invoker, nothing is recorded

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::{
    brews::Brew,
    commands::{
        Context,
        brew_response::{format_brew_master, format_brewed, format_missing_brew_name},
        registry::HandlerResult,
    },
};

/// Records a fresh pot named after the argument.
///
/// An empty argument is rejected with a usage hint.
pub fn brew(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling brew command");

        let brew_name = context.command.argument.trim();
        if brew_name.is_empty() {
            return Ok(Some(
                context
                    .reply(format_missing_brew_name())
                    .into_invalid_argument(),
            ));
        }

        let brew = Brew::new(brew_name, &context.command.user.name, context.now);
        context.brews.save(brew).await?;

        Ok(Some(context.reply(format_brewed(
            &context.command.user.mention(),
            brew_name,
        ))))
    }
    .boxed()
}

/// Compliments the invoker.
pub fn brew_private(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling private brew command");

        Ok(Some(context.reply(format_brew_master(
            &context.command.user.mention(),
        ))))
    }
    .boxed()
}
