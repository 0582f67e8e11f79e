//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It turns raw messages into [`CommandRecord`]s and hands
//! them to the [`Dispatcher`].
//!
//! # Flow
//!
//! ```text
//! Chat Message → parse() → CommandRecord → execute() → Option<ResponseIntent>
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use brewbot::commands::{Commander, Services, UserIdentity};
//! # async fn example(settings: &brewbot::config::Bot, services: Services) -> anyhow::Result<()> {
//! let commander = Commander::new(settings, services)?;
//! let user = UserIdentity::new("U024BE7LH", "alice");
//!
//! let record = commander.parse("!coffee brew Blue Heeler", &user).unwrap();
//! if let Some(intent) = commander.execute(record).await? {
//!     println!("Bot response: {}", intent.text);
//! }
//! # Ok(())
//! # }
//! ```

use command_parser::Parser;
use log::{debug, info};

use crate::{
    commands::{
        CommandRecord, DispatchError, Dispatcher, HandlerRegistry, RegistryError, ResponseIntent,
        Scope, Services, UserIdentity,
        actions::declarations,
        brew_response::{format_command_failure, format_unknown_command},
        command::CommandParsingError,
    },
    config,
};

/// Option prefix of the command parser.
const OPTION_PREFIX: char = '-';

/// Errors that can occur while parsing a message.
///
/// Both are silent: the message was not meant for the bot.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// The message does not start with any of the scope prefixes
    NotACommand,
    /// The message is a command for another bot
    NotForBot,
}

/// Command orchestrator for parsing and executing bot commands.
///
/// The Commander is responsible for:
/// - Parsing raw message text into command records, one parser per scope prefix
/// - Dispatching records to the registered handlers
/// - Providing the replies sent when no handler matches or a handler fails
pub struct Commander {
    /// Command word the bot answers to
    command: String,
    /// Parsers with the scope their prefix stands for
    parsers: Vec<(Parser, Scope)>,
    /// Full help command, e.g. `/coffee help`
    help_command: String,
    /// Router holding the handler registry
    dispatcher: Dispatcher,
}

impl Commander {
    /// Creates a new Commander and builds the handler registry.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when two handlers are declared with the same
    /// name and scope. This must abort the startup.
    pub fn new(settings: &config::Bot, services: Services) -> Result<Self, RegistryError> {
        let registry = HandlerRegistry::build(declarations())?;
        info!("registered {} command handlers", registry.len());
        for descriptor in registry.descriptors() {
            debug!("'{}' bound in {} scope", descriptor.name(), descriptor.scope());
        }

        let help_command = format!("{}{} help", settings.private_prefix, settings.command);
        let unknown_command_text = format_unknown_command(&help_command);
        let responses = services.responses.clone();
        let dispatcher = Dispatcher::new(registry, services, move |_record: &CommandRecord| {
            responses.build_text_response(unknown_command_text.clone())
        });

        let parsers = [
            (settings.public_prefix, Scope::Public),
            (settings.private_prefix, Scope::Private),
            (settings.ephemeral_prefix, Scope::Ephemeral),
        ]
        .into_iter()
        .map(|(prefix, scope)| (Parser::new(prefix, OPTION_PREFIX), scope))
        .collect();

        Ok(Commander {
            command: settings.command.clone(),
            parsers,
            help_command,
            dispatcher,
        })
    }

    /// Parses a message body into a command record.
    ///
    /// The prefix the message starts with decides the scope.
    ///
    /// # Errors
    ///
    /// - [`CommandParseError::NotACommand`] for regular chat
    /// - [`CommandParseError::NotForBot`] for commands addressed to another bot
    pub fn parse(&self, body: &str, user: &UserIdentity) -> Result<CommandRecord, CommandParseError> {
        let body = body.trim();

        let mut for_other_bot = false;
        for (parser, scope) in &self.parsers {
            match CommandRecord::parse(parser, &self.command, *scope, body, user) {
                Ok(record) => return Ok(record),
                Err(CommandParsingError::NotForBot) => for_other_bot = true,
                Err(CommandParsingError::UnableToParse) => {}
            }
        }

        debug!("ignoring message: {}", body);

        match for_other_bot {
            true => Err(CommandParseError::NotForBot),
            false => Err(CommandParseError::NotACommand),
        }
    }

    /// Executes a command record.
    ///
    /// # Errors
    ///
    /// Returns the [`DispatchError`] of a failed handler.
    pub async fn execute(
        &self,
        record: CommandRecord,
    ) -> Result<Option<ResponseIntent>, DispatchError> {
        self.dispatcher.dispatch(record).await
    }

    /// Returns the reply sent to the user when a command failed.
    pub fn failure_message(command: &str) -> String {
        format_command_failure(command)
    }

    /// Returns the full help command, e.g. `/coffee help`.
    pub fn help_command(&self) -> &str {
        &self.help_command
    }
}
