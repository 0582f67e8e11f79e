//! Configuration file structures for the brew bot.
//!
//! The configuration is a YAML file split into three sections: the brew master
//! and display settings, the command settings and the console identity.
//!
//! # Configuration File Format
//!
//! ```yaml
//! brew:
//!   # The person in charge of making more coffee
//!   master_id: "U024BE7LH"
//!   master_username: "nick"
//!   # Offset from UTC brew times are displayed in, in hours
//!   utc_offset_hours: -6
//!
//! bot:
//!   # Word following the prefix, e.g. `!coffee brew`
//!   command: "coffee"
//!   public_prefix: "!"
//!   private_prefix: "/"
//!   ephemeral_prefix: "?"
//!   # Seconds a command may run before the bot gives up on it
//!   request_timeout_secs: 10
//!
//! console:
//!   user_id: "U0LOCAL"
//!   user_name: "operator"
//! ```
//!
//! Only the `brew.master_*` keys are mandatory.
//!
//! # Environment Variable Overrides
//!
//! Every key can be overridden with a `BREWBOT_` variable, sections being
//! separated by a double underscore:
//!
//! ```bash
//! export BREWBOT_BREW__MASTER_ID="U024BE7LH"
//! export BREWBOT_BOT__COMMAND="tea"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "BREWBOT_";

/// Root configuration structure for the brew bot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Brew master and display settings
    pub brew: Brew,
    /// Command settings
    #[serde(default)]
    pub bot: Bot,
    /// Identity of the local operator
    #[serde(default)]
    pub console: Console,
}

impl Config {
    /// Loads the configuration from a YAML file merged with `BREWBOT_` environment variables.
    ///
    /// Environment variables take precedence over the file. A missing file is
    /// not an error as long as the environment provides every mandatory key.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] when the file is malformed or a mandatory key is missing.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Brew master and display settings.
///
/// ```yaml
/// brew:
///   master_id: "U024BE7LH"
///   master_username: "nick"
///   utc_offset_hours: -6
/// ```
#[derive(Debug, Deserialize)]
pub struct Brew {
    /// Platform id of the brew master
    pub master_id: String,
    /// Display name of the brew master
    pub master_username: String,
    /// Offset from UTC brew times are displayed in, in hours.
    ///
    /// Defaults to Central Standard Time.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

/// Command settings.
#[derive(Debug, Deserialize)]
pub struct Bot {
    /// Command word the bot answers to
    #[serde(default = "default_command")]
    pub command: String,
    /// Prefix of commands answered to the whole channel
    #[serde(default = "default_public_prefix")]
    pub public_prefix: char,
    /// Prefix of commands answered to the invoker only
    #[serde(default = "default_private_prefix")]
    pub private_prefix: char,
    /// Prefix of commands answered to the invoker only, without history
    #[serde(default = "default_ephemeral_prefix")]
    pub ephemeral_prefix: char,
    /// Seconds a command may run before it is abandoned
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            command: default_command(),
            public_prefix: default_public_prefix(),
            private_prefix: default_private_prefix(),
            ephemeral_prefix: default_ephemeral_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Identity the console transport attributes messages to.
#[derive(Debug, Deserialize)]
pub struct Console {
    #[serde(default = "default_console_user_id")]
    pub user_id: String,
    #[serde(default = "default_console_user_name")]
    pub user_name: String,
}

impl Default for Console {
    fn default() -> Self {
        Console {
            user_id: default_console_user_id(),
            user_name: default_console_user_name(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    -6
}

fn default_command() -> String {
    "coffee".to_owned()
}

fn default_public_prefix() -> char {
    '!'
}

fn default_private_prefix() -> char {
    '/'
}

fn default_ephemeral_prefix() -> char {
    '?'
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_console_user_id() -> String {
    "U0LOCAL".to_owned()
}

fn default_console_user_name() -> String {
    "operator".to_owned()
}
