use serenity::all::{Context, EventHandler, GuildId, Interaction, Message, Ready, VoiceState};
use serenity::async_trait;

use crate::state::AppState;

pub mod interaction;
pub mod message;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called once every guild from the ready payload is in the cache
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        ready::handle_cache_ready(&self.state, ctx, guilds).await;
    }

    /// Called when a member joins, leaves or changes state in a voice channel
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.state, ctx, old, new).await;
    }

    /// Called when a slash command (or other interaction) is used
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }

    /// Called when a message is sent in a channel the bot can see
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.state, ctx, message).await;
    }
}
