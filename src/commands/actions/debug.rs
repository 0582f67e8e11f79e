//! Debug command handler: echoes what the bot understood.

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{Context, brew_response::format_command_fields, registry::HandlerResult};

pub fn debug(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling debug command");

        Ok(Some(context.reply(format_command_fields(&context.command))))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Scope, test_utils::create_test_context};

    #[tokio::test]
    async fn test_debug_echoes_the_command() {
        let context = create_test_context("debug", Scope::Private, "a b  c");
        let intent = debug(&context).await.unwrap().unwrap();

        assert_eq!(
            intent.text,
            "name : debug\nscope : private\ntext : a b  c\nuser_id : U0TEST\nuser_name : alice"
        );
    }
}
