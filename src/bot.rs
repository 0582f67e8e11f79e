//! Bot module wiring the console transport to the command pipeline.
//!
//! This module provides the main [`Bot`] implementation. It owns the brew
//! store, the [`Commander`] and the console client, and runs the bot
//! lifecycle.
//!
//! # Architecture
//!
//! The bot operates with two concurrent tasks:
//!
//! 1. **Console Sync Task**: Reads messages, parses them into commands, dispatches
//!    them and writes the replies back. Every message is handled in its own task.
//!
//! 2. **Brew Persistence Task**: Periodically saves the brews to disk so they
//!    survive bot restarts.
//!
//! # Command Processing Flow
//!
//! ```text
//! Console Line → Parse → Dispatch (with timeout) → Reply with the intent text
//! ```
//!
//! # Failures
//!
//! - Messages that are not commands are ignored
//! - A failing or timed out handler gets the generic failure reply, naming the command
//! - A rejected argument is answered like any other reply

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use chrono::FixedOffset;
use log::{debug, error, info, warn};
use tokio::{
    io::{BufReader, Stdout},
    time,
};

use crate::{
    Args,
    brews::{BrewRepository, BrewStore},
    commands::{CommandParseError, Commander, PlainTextResponseBuilder, Services, UserIdentity},
    config::Config,
    console::ConsoleClient,
    utils::get_path,
};

/// Seconds in an hour, for the display offset.
const SECONDS_PER_HOUR: i32 = 3600;

/// Context for processing a console message.
struct MessageContext {
    /// The message body text
    body: String,
    /// The user who sent the message
    user: UserIdentity,
    /// Maximum time a command may run
    request_timeout: Duration,
    /// Thread-safe reference to the console client
    console: Arc<ConsoleClient<Stdout>>,
    /// Thread-safe reference to the command handler
    commander: Arc<Commander>,
}

/// Main bot structure connecting the console to the command pipeline.
pub struct Bot {
    /// Console client reading messages and writing replies
    console: Arc<ConsoleClient<Stdout>>,

    /// Brew storage, persisted periodically and on shutdown
    brew_store: Arc<BrewStore>,

    /// Command parser and dispatcher.
    ///
    /// Holds no mutable state and is shared by every message task.
    commander: Arc<Commander>,

    /// Maximum time a command may run before the user gets the failure reply
    request_timeout: Duration,
}

impl Bot {
    /// Creates a new Bot instance from configuration and command line arguments.
    ///
    /// Loads the persisted brews from `<data>/brews` and builds the handler registry.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configured display offset is out of range
    /// - Two handlers are registered under the same name and scope
    pub async fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        let utc_offset =
            FixedOffset::east_opt(config.brew.utc_offset_hours * SECONDS_PER_HOUR)
                .with_context(|| {
                    format!(
                        "invalid display offset: {} hours",
                        config.brew.utc_offset_hours
                    )
                })?;

        let brew_store = Arc::new(BrewStore::new(get_path(&args.data, "brews")).await);

        let services = Services {
            brews: Arc::clone(&brew_store) as Arc<dyn BrewRepository>,
            responses: Arc::new(PlainTextResponseBuilder),
            brew_master: Arc::new(UserIdentity::new(
                &config.brew.master_id,
                &config.brew.master_username,
            )),
            utc_offset,
        };

        let commander = Arc::new(
            Commander::new(&config.bot, services).context("failed to register command handlers")?,
        );

        let console = Arc::new(ConsoleClient::stdio(UserIdentity::new(
            &config.console.user_id,
            &config.console.user_name,
        )));

        Ok(Bot {
            console,
            brew_store,
            commander,
            request_timeout: Duration::from_secs(config.bot.request_timeout_secs),
        })
    }

    /// Starts the bot and processes messages until the end of the input.
    ///
    /// The brews are persisted once more before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        self.brew_store.start_persistence_task();

        info!(
            "ready, type `{}` for the list of commands",
            self.commander.help_command()
        );

        let console = Arc::clone(&self.console);
        let commander = Arc::clone(&self.commander);
        let request_timeout = self.request_timeout;

        let on_message = move |body: String, user: UserIdentity| {
            Self::handle_message(MessageContext {
                body,
                user,
                request_timeout,
                console: Arc::clone(&console),
                commander: Arc::clone(&commander),
            })
        };

        let result = self
            .console
            .sync(BufReader::new(tokio::io::stdin()), on_message)
            .await;

        self.brew_store.persist().await;
        result
    }

    /// Handles one console message.
    ///
    /// 1. Parse the message body, silently ignoring anything not for the bot
    /// 2. Dispatch the command, giving up after the request timeout
    /// 3. Send the reply, if any, with the visibility of the command
    async fn handle_message(ctx: MessageContext) {
        let record = match ctx.commander.parse(&ctx.body, &ctx.user) {
            Ok(record) => record,
            // Return silently if the message is not for the bot
            Err(CommandParseError::NotACommand) => return,
            Err(CommandParseError::NotForBot) => {
                debug!("command for another bot: {}", ctx.body);
                return;
            }
        };

        let scope = record.scope;
        let name = record.name.clone();

        let text = match time::timeout(ctx.request_timeout, ctx.commander.execute(record)).await {
            Ok(Ok(Some(intent))) => {
                if intent.is_invalid_argument() {
                    debug!("invalid argument for command '{}'", name);
                }
                intent.text
            }
            Ok(Ok(None)) => return,
            Ok(Err(e)) => {
                error!("{}: {:?}", e, e.source);
                Commander::failure_message(&e.command)
            }
            Err(_) => {
                warn!(
                    "command '{}' timed out after {:?}",
                    name, ctx.request_timeout
                );
                Commander::failure_message(&name)
            }
        };

        ctx.console.send_reply(scope, &ctx.user, &text).await;
    }
}
