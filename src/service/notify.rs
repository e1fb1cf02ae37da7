//! Direct message helpers.

use serenity::all::{CacheHttp, CreateMessage, UserId};

use crate::error::AppError;

/// Sent to a member right after they were disconnected for self-deafening.
pub const DISCONNECT_NOTICE: &str = "You were disconnected because you self-deafened in a voice \
channel. Please undeafen before rejoining. If you need time, use /exempt request.";

/// Sends a plain text direct message to a user.
///
/// # Returns
/// - `Ok(())` - Message delivered
/// - `Err(AppError::DiscordErr)` - DM channel could not be opened or the message was
///   rejected. Closed DMs surface as a 403, check with `AppError::is_forbidden`.
pub async fn send_dm(
    cache_http: impl CacheHttp,
    user_id: UserId,
    content: impl Into<String>,
) -> Result<(), AppError> {
    user_id
        .direct_message(cache_http, CreateMessage::new().content(content))
        .await?;

    Ok(())
}
