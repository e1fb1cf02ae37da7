//! Sending replies to deferred slash commands.

use serenity::all::{
    CommandInteraction, Context, CreateEmbed, CreateInteractionResponseFollowup,
    EditInteractionResponse,
};

/// Content of a command reply.
pub enum Reply {
    Text(String),
    Embed(CreateEmbed),
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<CreateEmbed> for Reply {
    fn from(embed: CreateEmbed) -> Self {
        Self::Embed(embed)
    }
}

/// Fills in the deferred response, falling back to a follow-up message.
///
/// Visibility (ephemeral or public) is decided when the command is deferred; the
/// follow-up fallback uses `ephemeral` to match it.
pub async fn send(ctx: &Context, command: &CommandInteraction, reply: Reply, ephemeral: bool) {
    let (edit, followup) = match reply {
        Reply::Text(text) => (
            EditInteractionResponse::new().content(text.clone()),
            CreateInteractionResponseFollowup::new().content(text),
        ),
        Reply::Embed(embed) => (
            EditInteractionResponse::new().embed(embed.clone()),
            CreateInteractionResponseFollowup::new().embed(embed),
        ),
    };

    if let Err(e) = command.edit_response(ctx, edit).await {
        tracing::warn!(
            "Failed to edit deferred response for /{}: {}",
            command.data.name,
            e
        );

        if let Err(e) = command
            .create_followup(ctx, followup.ephemeral(ephemeral))
            .await
        {
            tracing::error!(
                "Failed to send follow-up response for /{}: {}",
                command.data.name,
                e
            );
        }
    }
}
