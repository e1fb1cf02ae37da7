//! `/sync` - owner-only command re-registration.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
};

use crate::{
    bot::command::{options, reply::Reply, require_owner, sync_commands},
    error::{command::CommandError, AppError},
    state::AppState,
    util::parse::parse_snowflake,
};

pub const NAME: &str = "sync";

pub const SYNC_FAILED_REPLY: &str = "Sync failed. Check logs.";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Sync slash commands.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "guild_id",
            "Optional guild ID to sync to",
        ))
}

/// Parses the optional `guild_id` argument shared by `/sync` and `!sync`.
pub fn parse_guild_arg(raw: Option<&str>) -> Result<Option<GuildId>, CommandError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => parse_snowflake(value)
            .map(|id| Some(GuildId::new(id)))
            .ok_or(CommandError::InvalidGuildId),
    }
}

/// Runs a sync and turns any failure into the reply text.
pub async fn sync_reply(ctx: &Context, guild_id: Option<GuildId>) -> String {
    match sync_commands(&ctx.http, guild_id).await {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Failed to sync commands: {}", e);
            SYNC_FAILED_REPLY.to_string()
        }
    }
}

pub async fn run(
    ctx: &Context,
    state: &AppState,
    command: &CommandInteraction,
) -> Result<Reply, AppError> {
    require_owner(ctx, state, command.user.id).await?;

    let guild_id = parse_guild_arg(options::string(&command.data.options(), "guild_id"))?;

    Ok(sync_reply(ctx, guild_id).await.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guild_arg_is_optional() {
        assert_eq!(parse_guild_arg(None), Ok(None));
        assert_eq!(parse_guild_arg(Some("  ")), Ok(None));
    }

    #[test]
    fn guild_arg_must_be_numeric() {
        assert_eq!(
            parse_guild_arg(Some("123456789")),
            Ok(Some(GuildId::new(123456789)))
        );
        assert_eq!(
            parse_guild_arg(Some("my-server")),
            Err(CommandError::InvalidGuildId)
        );
        assert_eq!(parse_guild_arg(Some("0")), Err(CommandError::InvalidGuildId));
    }
}
