//! Brewbot - A chat bot keeping track of the office coffee pots.
//!
//! This is the main entry point for the brew bot. It reads chat commands from
//! the console, routes them to the registered handlers and prints the replies.
//!
//! # Overview
//!
//! Colleagues announce the pots they brew, ask whether there is coffee left and
//! ping the brew master when the last pot is gone. Every command can be issued
//! publicly, privately or ephemerally, and the same command word can do
//! something different in each scope.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! brew:
//!   master_id: "U024BE7LH"
//!   master_username: "nick"
//!
//! bot:
//!   command: "coffee"
//! ```
//!
//! See the [`config`] module for every key and its default.
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `BREWBOT_` prefix:
//!
//! ```bash
//! export BREWBOT_BREW__MASTER_ID="U024BE7LH"
//! export BREWBOT_BREW__MASTER_USERNAME="nick"
//! ```
//!
//! # Usage
//!
//! ```bash
//! brewbot --config config.yaml --data ./brewbot-data
//! ```
//!
//! # Bot Commands
//!
//! - `/coffee` - Status of the latest pot
//! - `/coffee help` - Display help information
//! - `/coffee today` - Pots brewed in the last 12 hours
//! - `!coffee brew <name>` - Announce a fresh pot
//! - `!coffee gone` - Mark the pots as gone and ping the brew master
//! - `?coffee last <count>` - The most recent pots
//!
//! # Architecture
//!
//! - [`brews`] - Brew records, storage and persistence
//! - [`bot`] - Main bot logic wiring the console to the command pipeline
//! - [`commands`] - Command parsing, handler registry, dispatching and replies
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`console`] - Line based console transport
//! - [`utils`] - Utility functions for path handling
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod brews;
mod commands;
mod config;
mod console;
mod utils;

/// Command-line arguments for the brew bot.
///
/// # Examples
///
/// ```bash
/// brewbot --config config.yaml --data ./brewbot-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `brews` - JSON file with the recorded brews
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the brew bot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration merged with the environment
/// 4. **Bot Initialization**: Loads the persisted brews and registers the handlers
/// 5. **Bot Execution**: Processes console messages until the end of the input
///
/// Errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting brewbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
    }
}
