//! Command records and raw message parsing.
//!
//! This module converts message text such as `!coffee brew Blue Heeler` into a
//! [`CommandRecord`]: a command name, the remaining argument text, the
//! [`Scope`] the command was issued with and the invoking user.

use std::fmt;

use command_parser::Parser;
use log::debug;

/// Visibility of a command and of its reply.
///
/// The scope is part of the handler lookup key: the same command word can be
/// bound to different handlers depending on how it was issued.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scope {
    /// Visible to the whole channel
    Public,
    /// Visible only to the invoker, in the context the command was issued in
    #[default]
    Private,
    /// Visible only to the invoker, not kept in the channel history
    Ephemeral,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Public => "public",
            Scope::Private => "private",
            Scope::Ephemeral => "ephemeral",
        };
        f.write_str(name)
    }
}

/// Identity of a chat user.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UserIdentity {
    /// Platform id of the user
    pub id: String,
    /// Display name of the user
    pub name: String,
}

impl UserIdentity {
    pub fn new(id: &str, name: &str) -> Self {
        UserIdentity {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Returns the chat reference mentioning this user, e.g. `<@U024BE7LH|alice>`.
    pub fn mention(&self) -> String {
        format!("<@{}|{}>", self.id, self.name)
    }
}

/// An inbound command, as produced by the transport.
///
/// # Examples
///
/// ```
/// # use brewbot::commands::{CommandRecord, Scope, UserIdentity};
/// let record = CommandRecord {
///     name: "brew".to_string(),
///     scope: Scope::Public,
///     argument: "Blue Heeler".to_string(),
///     user: UserIdentity::new("U1", "alice"),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRecord {
    /// Command name, empty for the bare command
    pub name: String,
    /// Scope supplied by the transport
    pub scope: Scope,
    /// Free text following the command name, single-space separated
    pub argument: String,
    /// User who issued the command
    pub user: UserIdentity,
}

/// Errors that can occur during command parsing.
///
/// Neither error should produce a reply: the message was simply not meant
/// for the bot.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command is addressed to another command word
    NotForBot,
}

impl CommandRecord {
    /// Parses a message body into a command record.
    ///
    /// The first argument after the command word becomes the command name and
    /// the remaining arguments, joined with single spaces, become the argument
    /// text. A message carrying only the command word yields the empty name.
    ///
    /// # Arguments
    ///
    /// * `parser` - Parser configured with the prefix of the given scope
    /// * `command` - Command word of the bot, e.g. `coffee`
    /// * `scope` - Scope bound to the parser prefix
    /// * `body` - The message text to parse
    /// * `user` - The user who sent the message
    ///
    /// # Errors
    ///
    /// - The message is not a command - [`CommandParsingError::UnableToParse`]
    /// - The command is for another command word - [`CommandParsingError::NotForBot`]
    pub fn parse(
        parser: &Parser,
        command: &str,
        scope: Scope,
        body: &str,
        user: &UserIdentity,
    ) -> Result<Self, CommandParsingError> {
        // The parser drops the last word of the message, so pad with a dummy one
        let body = body.to_string() + " dummy";

        let parsed = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        if parsed.name != command {
            return Err(CommandParsingError::NotForBot);
        }

        debug!("parsing command: {:?}", parsed);

        let (name, argument) = match parsed.arguments.split_first() {
            Some((name, rest)) => (name.clone(), rest.join(" ")),
            None => (String::new(), String::new()),
        };

        Ok(CommandRecord {
            name,
            scope,
            argument,
            user: user.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<CommandRecord, CommandParsingError> {
        let parser = Parser::new('!', '-');
        let user = UserIdentity::new("U1", "alice");
        CommandRecord::parse(&parser, "coffee", Scope::Public, body, &user)
    }

    #[test]
    fn test_parse_name_and_argument() {
        let record = parse("!coffee brew Blue Heeler").unwrap();
        assert_eq!(record.name, "brew");
        assert_eq!(record.argument, "Blue Heeler");
        assert_eq!(record.scope, Scope::Public);
        assert_eq!(record.user, UserIdentity::new("U1", "alice"));
    }

    #[test]
    fn test_parse_name_without_argument() {
        let record = parse("!coffee today").unwrap();
        assert_eq!(record.name, "today");
        assert_eq!(record.argument, "");
    }

    #[test]
    fn test_parse_bare_command_has_empty_name() {
        let record = parse("!coffee").unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.argument, "");
    }

    #[test]
    fn test_parse_other_command_word() {
        assert_eq!(
            parse("!tea brew Earl Grey"),
            Err(CommandParsingError::NotForBot)
        );
    }

    #[test]
    fn test_parse_not_a_command() {
        assert_eq!(
            parse("Is there any coffee left?"),
            Err(CommandParsingError::UnableToParse)
        );
    }

    #[test]
    fn test_user_mention() {
        let user = UserIdentity::new("U024BE7LH", "nick");
        assert_eq!(user.mention(), "<@U024BE7LH|nick>");
    }

    #[test]
    fn test_default_scope_is_private() {
        assert_eq!(Scope::default(), Scope::Private);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Public.to_string(), "public");
        assert_eq!(Scope::Private.to_string(), "private");
        assert_eq!(Scope::Ephemeral.to_string(), "ephemeral");
    }
}
