use serenity::all::{Context, Message};

use crate::{
    bot::command::sync::{parse_guild_arg, sync_reply},
    state::AppState,
};

const SYNC_PREFIX_COMMAND: &str = "!sync";

/// Splits `!sync [guild_id]` into its optional argument.
///
/// Returns `None` when the message is not a sync command.
pub fn parse_sync_command(content: &str) -> Option<Option<&str>> {
    let mut parts = content.split_whitespace();
    if parts.next() != Some(SYNC_PREFIX_COMMAND) {
        return None;
    }
    Some(parts.next())
}

/// Handle message creation
///
/// Only direct messages are considered; they carry content without the privileged
/// message content intent. Non-owners are ignored silently.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.guild_id.is_some() || message.author.bot {
        return;
    }

    let Some(guild_arg) = parse_sync_command(&message.content) else {
        return;
    };

    match state.owners.is_owner(&ctx.http, message.author.id).await {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => {
            tracing::error!("Failed to resolve bot owner: {}", e);
            return;
        }
    }

    let reply = match parse_guild_arg(guild_arg) {
        Ok(guild_id) => sync_reply(&ctx, guild_id).await,
        Err(e) => e.to_string(),
    };

    if let Err(e) = message.reply(&ctx, reply).await {
        tracing::error!("Failed to reply to !sync from {}: {}", message.author.id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sync_command() {
        assert_eq!(parse_sync_command("!sync"), Some(None));
        assert_eq!(parse_sync_command("  !sync 123 "), Some(Some("123")));
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(parse_sync_command("hello"), None);
        assert_eq!(parse_sync_command("!synced"), None);
        assert_eq!(parse_sync_command(""), None);
    }
}
