//! Response formatters for bot commands.
//!
//! Every user-facing sentence of the bot lives here. Handlers pick the right
//! formatter and hand the text to the response builder.

use chrono::FixedOffset;

use crate::{brews::Brew, commands::CommandRecord};

/// Separator between the lines of a list reply.
const LINE_SEPARATOR: &str = "\n";

/// Formats the help message showing available bot commands.
///
/// # Arguments
///
/// * `brew_master` - Display name of the brew master
///
/// # Examples
///
/// ```
/// # use brewbot::commands::brew_response::format_help;
/// let help = format_help("Nick");
/// assert!(help.contains("---commands---"));
/// ```
pub fn format_help(brew_master: &str) -> String {
    format!(
        "---commands---\n\
        > -- A blank will show you if there is any coffee available.\n\
        > *brew {{Type of coffee you brewed.}}* -- Adds a fresh pot of coffee.\n\
        > *today* -- List all the coffee that was brewed today.\n\
        > *last {{count}}* -- List the last brews, at most 20.\n\
        > *gone* -- Sets the current pots to gone, and lets {} know to make another pot =)",
        brew_master
    )
}

/// Formats a response for a command without handler.
///
/// # Arguments
///
/// * `help_command` - The full help command, e.g. `/coffee help`
pub fn format_unknown_command(help_command: &str) -> String {
    format!(
        "Unknown command. Type `{}` for more information.",
        help_command
    )
}

/// Formats the generic reply sent when a command failed unexpectedly.
pub fn format_command_failure(command: &str) -> String {
    format!(
        "Something went wrong while handling `{}`, please try again later.",
        command
    )
}

/// Formats the reply of `today` when nothing was brewed recently.
pub fn format_nothing_brewed_today(brew_master_ref: &str) -> String {
    format!("No coffee brewed yet, {} go make some!", brew_master_ref)
}

/// Formats the reply of the bare command when nothing was ever brewed.
pub fn format_nothing_brewed() -> String {
    "No coffee brewed yet, go make some!".to_owned()
}

/// Formats the status of the latest brew.
pub fn format_status(brew: &Brew, minutes: i64) -> String {
    format!(
        "{} was brewed {} minutes ago by {}.",
        brew.name, minutes, brew.brewed_by
    )
}

/// Formats the hint sent when `brew` comes without a coffee name.
pub fn format_missing_brew_name() -> String {
    "Include the name of the coffee you brewed! Example, /coffee brew Blue Heeler".to_owned()
}

/// Formats the announcement of a fresh pot.
pub fn format_brewed(user_ref: &str, brew_name: &str) -> String {
    format!("{} brewed a pot of {}.", user_ref, brew_name)
}

/// Formats the private reply to `brew`.
pub fn format_brew_master(user_ref: &str) -> String {
    format!("You truly are a brew master {}.", user_ref)
}

/// Formats the public reply to `gone`.
pub fn format_make_more_coffee(brew_master_ref: &str) -> String {
    format!("{}, go make some more coffee!", brew_master_ref)
}

/// Formats the private reply to `gone`.
pub fn format_coffee_gone() -> String {
    "The coffee is gone, this is unfortunate.".to_owned()
}

/// Formats the rejection of a count that is not a number.
///
/// # Examples
///
/// ```
/// # use brewbot::commands::brew_response::format_invalid_number;
/// assert_eq!(format_invalid_number("abc"), "(abc) is not a valid number.");
/// ```
pub fn format_invalid_number(text: &str) -> String {
    format!("({}) is not a valid number.", text)
}

/// Formats the reply of `last` when there is nothing to list.
pub fn format_no_brews_found() -> String {
    "No brews found.".to_owned()
}

/// Formats one brew on a single line, with its time in the given offset.
///
/// # Examples
///
/// ```text
/// Blue Heeler was brewed by alice on Fri, Mar 1 @ 8:05 AM, and is still available.
/// ```
pub fn format_brew(brew: &Brew, utc_offset: &FixedOffset) -> String {
    format!(
        "{} was brewed by {} on {}, and is {}.",
        brew.name,
        brew.brewed_by,
        brew.brewed_at
            .with_timezone(utc_offset)
            .format("%a, %b %-d @ %-I:%M %p"),
        if brew.gone {
            "all gone"
        } else {
            "still available"
        }
    )
}

/// Formats brews one per line, or returns `empty` when there are none.
pub fn format_brews<'a, I>(brews: I, utc_offset: &FixedOffset, empty: String) -> String
where
    I: IntoIterator<Item = &'a Brew>,
{
    join_lines(brews.into_iter().map(|b| format_brew(b, utc_offset)), empty)
}

/// Formats every field of a command record as `key : value` lines.
pub fn format_command_fields(record: &CommandRecord) -> String {
    let fields = [
        ("name", record.name.clone()),
        ("scope", record.scope.to_string()),
        ("text", record.argument.clone()),
        ("user_id", record.user.id.clone()),
        ("user_name", record.user.name.clone()),
    ];

    join_lines(
        fields
            .iter()
            .map(|(key, value)| format!("{} : {}", key, value)),
        String::new(),
    )
}

/// Joins lines with [`LINE_SEPARATOR`], `empty` standing for no line at all.
fn join_lines<I>(lines: I, empty: String) -> String
where
    I: Iterator<Item = String>,
{
    let mut lines = lines.peekable();
    if lines.peek().is_none() {
        return empty;
    }

    lines.collect::<Vec<String>>().join(LINE_SEPARATOR)
}
