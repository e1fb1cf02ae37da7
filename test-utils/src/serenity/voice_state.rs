//! Test factory for creating Serenity VoiceState objects.

use serenity::all::VoiceState;

/// Creates a test Serenity VoiceState as sent in a VOICE_STATE_UPDATE event.
///
/// # Arguments
/// - `guild_id` - Guild the state belongs to
/// - `user_id` - Member the state belongs to
/// - `channel_id` - Voice channel, or `None` when the member left voice
/// - `self_deaf` - Whether the member deafened themselves
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
pub fn create_test_voice_state(
    guild_id: u64,
    user_id: u64,
    channel_id: Option<u64>,
    self_deaf: bool,
) -> VoiceState {
    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "session_id": "0123456789abcdef0123456789abcdef",
        "deaf": false,
        "mute": false,
        "self_deaf": self_deaf,
        "self_mute": self_deaf,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}
