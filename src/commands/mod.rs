//! Bot command parsing, routing and responses.
//!
//! This module provides the complete command processing pipeline for the bot.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting chat messages into [`CommandRecord`]s
//! 2. **Routing** - Resolving the handler bound to the record's name and [`Scope`]
//! 3. **Execution** - Running the handler with a fresh [`Context`]
//! 4. **Response** - Handlers return a [`ResponseIntent`] built from plain text
//!
//! # Architecture
//!
//! ```text
//! Chat Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────────────┐
//!      │                             ▼
//!      │                  ┌────────────────────┐
//!      │                  │   CommandRecord    │
//!      │                  └────────────────────┘
//!      │
//!      └── execute() ────────────────┐
//!                                    ▼
//!                         ┌────────────────────┐
//!                         │     Dispatcher     │
//!                         │  HandlerRegistry   │
//!                         └────────────────────┘
//!                                    │
//!                                    ▼
//!                         ┌────────────────────┐
//!                         │  Action Handlers   │
//!                         │  help, today, "",  │
//!                         │  brew, gone, debug,│
//!                         │  last              │
//!                         └────────────────────┘
//!                                    │
//!                                    ▼
//!                         ┌────────────────────┐
//!                         │   ResponseIntent   │
//!                         └────────────────────┘
//! ```
//!
//! # Command Structure
//!
//! Commands follow the format `<prefix>coffee [name] [argument...]`. The prefix
//! character selects the scope: by default `!` is public, `/` private and `?`
//! ephemeral.
//!
//! | Command | Scope | Description |
//! |---------|-------|-------------|
//! | *(none)* | private | Status of the latest pot |
//! | `help` | private | Display help information |
//! | `today` | private | Pots brewed in the last 12 hours |
//! | `brew <name>` | public | Announce a fresh pot |
//! | `brew` | private | Acknowledge the brew master |
//! | `gone` | public | Mark every pot as gone |
//! | `gone` | private | Sympathize |
//! | `debug` | private | Echo the command fields |
//! | `last <count>` | ephemeral | The most recent pots |
//!
//! # Error Handling
//!
//! - Messages that are not commands for the bot are ignored
//! - Commands without a handler get the unknown command reply
//! - Rejected arguments come back as intents marked
//!   [`Outcome::InvalidArgument`]
//! - Handler failures come back as [`DispatchError`]s naming the command

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

mod actions;
mod brew_response;
mod command;
mod commander;
mod dispatcher;
mod registry;
mod response;

pub use crate::commands::{
    command::{CommandRecord, Scope, UserIdentity},
    commander::{CommandParseError, Commander},
    dispatcher::{DispatchError, Dispatcher},
    registry::{HandlerRegistry, RegistryError},
    response::{Outcome, PlainTextResponseBuilder, ResponseBuilder, ResponseIntent},
};
use crate::brews::BrewRepository;

/// Collaborators shared by every handler invocation.
///
/// Cloning is cheap: every field is either reference counted or `Copy`.
#[derive(Clone)]
pub struct Services {
    /// Brew storage
    pub brews: Arc<dyn BrewRepository>,
    /// Builder turning text into replies
    pub responses: Arc<dyn ResponseBuilder>,
    /// The person in charge of making more coffee
    pub brew_master: Arc<UserIdentity>,
    /// Offset brew times are displayed in
    pub utc_offset: FixedOffset,
}

/// Runtime context for one handler invocation.
///
/// A context is created for every dispatch and dropped with it; handlers
/// never share one.
pub struct Context {
    /// The command being handled
    pub command: CommandRecord,
    /// Brew storage
    pub brews: Arc<dyn BrewRepository>,
    /// Builder turning text into replies
    pub responses: Arc<dyn ResponseBuilder>,
    /// The person in charge of making more coffee
    pub brew_master: Arc<UserIdentity>,
    /// Offset brew times are displayed in
    pub utc_offset: FixedOffset,
    /// When the dispatch started
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn new(command: CommandRecord, services: &Services) -> Self {
        Context {
            command,
            brews: Arc::clone(&services.brews),
            responses: Arc::clone(&services.responses),
            brew_master: Arc::clone(&services.brew_master),
            utc_offset: services.utc_offset,
            now: Utc::now(),
        }
    }

    /// Builds a successful text reply.
    pub fn reply(&self, text: String) -> ResponseIntent {
        self.responses.build_text_response(text)
    }
}
