use thiserror::Error;

/// Failures caused by how a command was invoked rather than by the bot itself.
///
/// The `Display` text of each variant is sent back to the invoking user verbatim as an
/// ephemeral reply, so it must stay short and user-facing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The `user_id` argument was neither a numeric ID nor a user mention.
    #[error("Invalid user ID. Provide a numeric ID or mention.")]
    InvalidUserId,

    /// The `guild_id` argument of a sync command was not a numeric ID.
    #[error("Invalid guild_id.")]
    InvalidGuildId,

    /// An owner-only command was used by someone else.
    #[error("Only the bot owner can use this command.")]
    NotOwner,

    /// A guild-only command was used in a direct message.
    #[error("This command can only be used in a server.")]
    GuildOnly,

    /// A required option was absent from the interaction payload.
    #[error("Missing required option `{0}`.")]
    MissingOption(&'static str),

    /// The interaction named a command or subcommand this bot does not register.
    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),
}
