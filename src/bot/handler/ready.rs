//! Ready and cache-ready event handlers.
//!
//! `ready` fires after the gateway handshake; the guild cache is still empty at that
//! point, so it only sets the presence and registers commands. `cache_ready` fires once
//! the guilds listed in the ready payload have arrived and runs everything that reads
//! voice states:
//! - A startup sweep disconnecting members who were already self-deafened
//! - Starting the periodic voice guard scheduler (once per process)

use serenity::all::{ActivityData, Context, GuildId, OnlineStatus, Ready};

use crate::{
    bot::command::register_startup_commands,
    scheduler::voice_guard::start_scheduler,
    service::voice_guard::STARTUP_SWEEP_REASON,
    state::AppState,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Application state with the presence text and sync guild
/// - `ctx` - Discord context for setting presence and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("Logged in as {} ({})", ready.user.name, ready.user.id);

    let activity = Some(state.config.presence_text.trim())
        .filter(|text| !text.is_empty())
        .map(ActivityData::playing);
    ctx.set_presence(activity, OnlineStatus::Online);

    register_startup_commands(&ctx.http, state.config.sync_guild_id).await;
}

/// Handles the cache-ready event once guilds are available.
pub async fn handle_cache_ready(state: &AppState, ctx: Context, guilds: Vec<GuildId>) {
    tracing::debug!("Cache ready with {} guild(s)", guilds.len());

    let disconnected = state
        .voice_guard
        .scan_voice_states(&ctx, STARTUP_SWEEP_REASON)
        .await;
    if disconnected > 0 {
        tracing::info!("Startup sweep disconnected {} member(s)", disconnected);
    }

    if !state.config.voice_guard.enhanced {
        return;
    }

    // Reconnects deliver another ready; the cell keeps the first scheduler.
    let result = state
        .guard_scheduler
        .get_or_try_init(|| start_scheduler(state.voice_guard.clone(), ctx.clone()))
        .await;

    if let Err(e) = result {
        tracing::error!("Failed to start voice guard scheduler: {}", e);
    }
}
