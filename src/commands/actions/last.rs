//! Last command handler.
//!
//! Lists the most recent brews. The argument is the number of brews to list,
//! capped by [`RECENT_BREWS_LIMIT`].
//!
//! # Validation
//!
//! The argument must parse as a non-negative integer. Anything else, the
//! empty argument included, is answered with `(<argument>) is not a valid
//! number.` marked as an invalid argument.

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{
    Context,
    actions::RECENT_BREWS_LIMIT,
    brew_response::{format_brews, format_invalid_number, format_no_brews_found},
    registry::HandlerResult,
};

pub fn last(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        let argument = &context.command.argument;
        info!("retrieving last brews: {}", argument);

        let Ok(count) = argument.parse::<usize>() else {
            return Ok(Some(
                context
                    .reply(format_invalid_number(argument))
                    .into_invalid_argument(),
            ));
        };

        let brews = context.brews.find_recent(RECENT_BREWS_LIMIT).await?;
        let text = format_brews(
            brews.iter().take(count),
            &context.utc_offset,
            format_no_brews_found(),
        );

        Ok(Some(context.reply(text)))
    }
    .boxed()
}
