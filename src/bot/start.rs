use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord client without connecting.
///
/// Kept separate from `start_bot` so `main` can grab the shard manager for a clean
/// shutdown before the client starts blocking.
///
/// # Arguments
/// - `state` - Application state handed to the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client construction failed (e.g. malformed token)
pub async fn init_bot(state: AppState) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::DIRECT_MESSAGES;

    let token = state.config.discord_token.clone();
    let client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;

    Ok(client)
}

/// Starts the Discord bot, blocking until every shard has shut down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
