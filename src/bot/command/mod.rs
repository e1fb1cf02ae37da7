//! Slash command registration and dispatch.
//!
//! Every command is deferred as soon as it arrives (publicly for `/ver`, ephemerally
//! otherwise) and answered by editing the deferred response, so storage and HTTP work
//! never races Discord's three second acknowledgement window.

pub mod blacklist;
pub mod exempt;
pub mod options;
pub mod reply;
pub mod sync;
pub mod ver;

use serenity::all::{
    Command, CommandInteraction, Context, CreateCommand, GuildId, Interaction, UserId,
};
use serenity::http::Http;

use crate::{
    error::{command::CommandError, AppError},
    state::AppState,
};

use self::reply::Reply;

/// Builds every slash command the bot registers.
pub fn build_commands() -> Vec<CreateCommand> {
    vec![
        blacklist::register(),
        exempt::register(),
        sync::register(),
        ver::register(),
    ]
}

/// Registers the commands globally, and additionally in `guild_id` when given.
///
/// # Returns
/// The reply shown by `/sync` and `!sync`, e.g. "Synced 4 global commands."
pub async fn sync_commands(http: &Http, guild_id: Option<GuildId>) -> Result<String, AppError> {
    let global = Command::set_global_commands(http, build_commands()).await?;

    let Some(guild_id) = guild_id else {
        return Ok(format!("Synced {} global commands.", global.len()));
    };

    let guild = guild_id.set_commands(http, build_commands()).await?;

    Ok(format!(
        "Synced {} global and {} guild commands.",
        global.len(),
        guild.len()
    ))
}

/// Registers commands when the bot connects.
///
/// With a sync guild configured the commands are only registered in that guild, where
/// they show up immediately; otherwise they are registered globally.
pub async fn register_startup_commands(http: &Http, sync_guild_id: Option<u64>) {
    match sync_guild_id.map(GuildId::new) {
        Some(guild_id) => match guild_id.set_commands(http, build_commands()).await {
            Ok(commands) => {
                tracing::info!("Synced {} commands to guild {}", commands.len(), guild_id)
            }
            Err(e) => tracing::error!("Failed to sync commands: {}", e),
        },
        None => match Command::set_global_commands(http, build_commands()).await {
            Ok(commands) => tracing::info!("Synced {} global commands", commands.len()),
            Err(e) => tracing::error!("Failed to sync commands: {}", e),
        },
    }
}

/// Handles an incoming interaction; anything but a slash command is ignored.
pub async fn handle_interaction(ctx: &Context, state: &AppState, interaction: &Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::debug!(
        "/{} used by {} ({})",
        command.data.name,
        command.user.name,
        command.user.id
    );

    let ephemeral = command.data.name != ver::NAME;
    let deferred = if ephemeral {
        command.defer_ephemeral(ctx).await
    } else {
        command.defer(ctx).await
    };
    if let Err(e) = deferred {
        tracing::warn!("Failed to acknowledge /{}: {}", command.data.name, e);
        return;
    }

    let result = match command.data.name.as_str() {
        blacklist::NAME => blacklist::run(ctx, state, command).await,
        exempt::NAME => exempt::run(ctx, state, command).await,
        sync::NAME => sync::run(ctx, state, command).await,
        ver::NAME => ver::run(state).await,
        other => Err(CommandError::UnknownCommand(other.to_string()).into()),
    };

    let reply = result.unwrap_or_else(|e| Reply::Text(e.reply_text()));

    reply::send(ctx, command, reply, ephemeral).await;
}

/// Returns the guild the command was used in, or `CommandError::GuildOnly` in DMs.
pub fn require_guild(command: &CommandInteraction) -> Result<GuildId, CommandError> {
    command.guild_id.ok_or(CommandError::GuildOnly)
}

/// Fails with `CommandError::NotOwner` unless `user_id` is a bot owner.
pub async fn require_owner(ctx: &Context, state: &AppState, user_id: UserId) -> Result<(), AppError> {
    if state.owners.is_owner(&ctx.http, user_id).await? {
        Ok(())
    } else {
        Err(CommandError::NotOwner.into())
    }
}

/// Display name of a cached guild, falling back to its ID.
pub fn guild_name(ctx: &Context, guild_id: GuildId) -> String {
    ctx.cache
        .guild(guild_id)
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| guild_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_json() -> Vec<serde_json::Value> {
        build_commands()
            .iter()
            .map(|command| {
                serde_json::to_value(command)
                    .unwrap_or_else(|e| panic!("failed to serialize command: {e}"))
            })
            .collect()
    }

    fn find<'a>(commands: &'a [serde_json::Value], name: &str) -> &'a serde_json::Value {
        commands
            .iter()
            .find(|command| command["name"] == name)
            .unwrap_or_else(|| panic!("missing command: {name}"))
    }

    #[test]
    fn expected_command_names_present() {
        let commands = command_json();
        let mut names: Vec<&str> = commands
            .iter()
            .filter_map(|command| command["name"].as_str())
            .collect();
        names.sort();

        assert_eq!(names, vec!["blacklist", "exempt", "sync", "ver"]);
    }

    #[test]
    fn commands_have_descriptions() {
        for command in command_json() {
            let name = command["name"].as_str().unwrap_or_default();
            let desc = command["description"].as_str().unwrap_or_default();
            assert!(!desc.is_empty(), "command {name} has empty description");
        }
    }

    #[test]
    fn blacklist_has_three_subcommands() {
        let commands = command_json();
        let blacklist = find(&commands, "blacklist");
        let subcommands: Vec<&str> = blacklist["options"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|option| option["name"].as_str())
            .collect();

        assert_eq!(subcommands, vec!["add", "remove", "list"]);
    }

    #[test]
    fn exemption_seconds_are_bounded() {
        let commands = command_json();
        let exempt = find(&commands, "exempt");

        for subcommand in ["request", "grant"] {
            let sub = exempt["options"]
                .as_array()
                .unwrap()
                .iter()
                .find(|option| option["name"] == subcommand)
                .unwrap();
            let seconds = sub["options"]
                .as_array()
                .unwrap()
                .iter()
                .find(|option| option["name"] == "seconds")
                .unwrap();

            assert_eq!(seconds["required"], true);
            assert_eq!(seconds["min_value"], 5);
            assert_eq!(seconds["max_value"], 86400);
        }
    }

    #[test]
    fn sync_guild_id_is_optional() {
        let commands = command_json();
        let sync = find(&commands, "sync");
        let guild_id = &sync["options"][0];

        assert_eq!(guild_id["name"], "guild_id");
        assert_ne!(guild_id["required"], true);
    }
}
