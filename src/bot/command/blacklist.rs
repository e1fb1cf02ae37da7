//! `/blacklist` - permanent exemptions from auto-disconnect.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::{
    bot::command::{options, reply::Reply, require_guild, require_owner},
    error::{command::CommandError, AppError},
    model::blacklist::{AddBlacklistParam, BlacklistEntry},
    service::exemption::{ExemptionService, BLACKLIST_LIST_LIMIT},
    state::AppState,
    util::parse::parse_user_id,
};

pub const NAME: &str = "blacklist";

/// Discord's message length limit.
const MAX_MESSAGE_LEN: usize = 2000;

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Manage auto-disconnect blacklist (exemptions)")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "add",
                "Exempt a user from auto-disconnect.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "user_id", "User ID or mention")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "reason",
                "Optional reason",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Remove a user from the blacklist.",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "user_id", "User ID or mention")
                    .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List blacklisted users.",
        ))
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    let guild_id = require_guild(command)?;
    require_owner(ctx, state, command.user.id).await?;

    let (subcommand, sub_options) = options::subcommand(command.data.options())
        .ok_or_else(|| CommandError::UnknownCommand(NAME.to_string()))?;

    let service = ExemptionService::new(&state.db);

    match subcommand {
        "add" => {
            let user_id = parse_target(&sub_options)?;
            service
                .add_blacklist(AddBlacklistParam {
                    guild_id: guild_id.get(),
                    user_id,
                    added_by: Some(command.user.id.get()),
                    reason: options::reason(&sub_options),
                })
                .await?;

            tracing::info!(
                "{} added {} to the blacklist of guild {}",
                command.user.id,
                user_id,
                guild_id
            );

            Ok(format!("Added <@{}> to the blacklist.", user_id).into())
        }
        "remove" => {
            let user_id = parse_target(&sub_options)?;
            let removed = service.remove_blacklist(guild_id.get(), user_id).await?;

            let message = if removed {
                format!("Removed <@{}> from the blacklist.", user_id)
            } else {
                format!("<@{}> is not in the blacklist.", user_id)
            };

            Ok(message.into())
        }
        "list" => {
            let entries = service.list_blacklist(guild_id.get()).await?;
            Ok(format_blacklist(&entries).into())
        }
        other => Err(CommandError::UnknownCommand(format!("{} {}", NAME, other)).into()),
    }
}

fn parse_target(sub_options: &[serenity::all::ResolvedOption<'_>]) -> Result<u64, CommandError> {
    let raw = options::required(options::string(sub_options, "user_id"), "user_id")?;
    parse_user_id(raw).ok_or(CommandError::InvalidUserId)
}

/// Renders `/blacklist list`.
///
/// Lines that would push the message past Discord's length limit are dropped.
pub fn format_blacklist(entries: &[BlacklistEntry]) -> String {
    if entries.is_empty() {
        return "Blacklist is empty.".to_string();
    }

    let mut content = format!("Blacklist (max {}):", BLACKLIST_LIST_LIMIT);
    for entry in entries {
        let line = format_entry(entry);
        if content.len() + 1 + line.len() > MAX_MESSAGE_LEN {
            break;
        }
        content.push('\n');
        content.push_str(&line);
    }

    content
}

fn format_entry(entry: &BlacklistEntry) -> String {
    let added_by = entry
        .added_by
        .map(|id| format!(" by <@{}>", id))
        .unwrap_or_default();

    format!(
        "<@{}> - {} (added {}{})",
        entry.user_id,
        entry.reason.as_deref().unwrap_or("no reason"),
        entry.added_at.format("%Y-%m-%d"),
        added_by
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry(user_id: u64, reason: Option<&str>, added_by: Option<u64>) -> BlacklistEntry {
        BlacklistEntry {
            guild_id: 1,
            user_id,
            added_by,
            reason: reason.map(str::to_string),
            added_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_list() {
        assert_eq!(format_blacklist(&[]), "Blacklist is empty.");
    }

    #[test]
    fn formats_entries() {
        let content = format_blacklist(&[
            entry(42, Some("streams muted"), Some(7)),
            entry(43, None, None),
        ]);

        assert_eq!(
            content,
            "Blacklist (max 50):\n\
             <@42> - streams muted (added 2026-01-10 by <@7>)\n\
             <@43> - no reason (added 2026-01-10)"
        );
    }

    #[test]
    fn stays_within_message_limit() {
        let reason = "x".repeat(200);
        let entries: Vec<BlacklistEntry> = (0..50)
            .map(|i| entry(100_000_000_000_000_000 + i, Some(&reason), Some(7)))
            .collect();

        let content = format_blacklist(&entries);

        assert!(content.len() <= MAX_MESSAGE_LEN);
        assert!(content.starts_with("Blacklist (max 50):\n<@100000000000000000>"));
    }
}
