use serenity::all::{Context, VoiceState};

use crate::{
    service::voice_guard::{is_new_self_deafen, VOICE_UPDATE_REASON},
    state::AppState,
};

/// Handle a voice state update
///
/// A fresh self-deafen triggers an immediate disconnect attempt followed by delayed
/// verification passes when the enhanced guard is enabled.
pub async fn handle_voice_state_update(
    state: &AppState,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };
    if !is_new_self_deafen(old.as_ref(), &new) {
        return;
    }

    let user_id = new.user_id;

    if let Err(e) = state
        .voice_guard
        .maybe_disconnect(&ctx, guild_id, user_id, VOICE_UPDATE_REASON)
        .await
    {
        tracing::error!("Failed to disconnect {} in guild {}: {}", user_id, guild_id, e);
    }

    state.voice_guard.schedule_verify(&ctx, guild_id, user_id);
}
