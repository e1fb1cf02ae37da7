//! Accessors over resolved slash command options.

use serenity::all::{ResolvedOption, ResolvedValue, User};

use crate::error::command::CommandError;

/// Splits a subcommand invocation into the subcommand name and its options.
pub fn subcommand<'a>(
    options: Vec<ResolvedOption<'a>>,
) -> Option<(&'a str, Vec<ResolvedOption<'a>>)> {
    options
        .into_iter()
        .find_map(|option| match option.value {
            ResolvedValue::SubCommand(sub_options) => Some((option.name, sub_options)),
            _ => None,
        })
}

pub fn string<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::String(value) if option.name == name => Some(*value),
        _ => None,
    })
}

pub fn integer(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::Integer(value) if option.name == name => Some(*value),
        _ => None,
    })
}

pub fn user<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a User> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::User(user, _) if option.name == name => Some(*user),
        _ => None,
    })
}

/// Optional free-text reason; blank input counts as none.
pub fn reason(options: &[ResolvedOption<'_>]) -> Option<String> {
    string(options, "reason")
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string)
}

/// Turns a missing required option into a `CommandError`.
pub fn required<T>(value: Option<T>, name: &'static str) -> Result<T, CommandError> {
    value.ok_or(CommandError::MissingOption(name))
}
