//! Help command handler.
//!
//! Lists the available commands. Stateless: always returns the same message.

use futures::{FutureExt, future::BoxFuture};
use log::info;

use crate::commands::{Context, brew_response::format_help, registry::HandlerResult};

/// Returns formatted help information about available commands.
pub fn help(context: &Context) -> BoxFuture<'_, HandlerResult> {
    async move {
        info!("handling help command");

        Ok(Some(context.reply(format_help(&context.brew_master.name))))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Outcome, Scope, test_utils::create_test_context};

    #[tokio::test]
    async fn test_help() {
        let context = create_test_context("help", Scope::Private, "");
        let intent = help(&context).await.unwrap().unwrap();

        assert!(intent.text.starts_with("---commands---"));
        assert!(intent.text.contains("lets nick know"));
        assert_eq!(intent.outcome, Outcome::Success);
    }
}
