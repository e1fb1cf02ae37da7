//! Error types and user-facing reply mapping.
//!
//! `AppError` is the top-level error type returned by services, repositories and command
//! handlers. Event handlers cannot propagate errors back to Discord, so instead of an HTTP
//! response mapping, `AppError::reply_text` turns an error into the message shown to the
//! user: command errors are echoed as-is, everything else is logged and replaced with a
//! generic message.

pub mod command;
pub mod config;

use thiserror::Error;

use crate::error::{command::CommandError, config::ConfigError};

/// Reply used for any failure that is not the invoking user's fault.
pub const GENERIC_FAILURE_REPLY: &str = "Something went wrong. Check logs.";

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Invalid command usage, shown to the invoking user.
    #[error(transparent)]
    CommandErr(#[from] CommandError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client request error from reqwest (GitHub release lookups).
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error from the periodic voice guard.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Process or filesystem error while running update commands.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the text replied to the invoking user.
    ///
    /// Command errors are the user's to fix and are returned verbatim. Every other
    /// variant is logged at error level and mapped to `GENERIC_FAILURE_REPLY` so that
    /// internals never leak into a chat message.
    pub fn reply_text(&self) -> String {
        match self {
            Self::CommandErr(err) => err.to_string(),
            err => {
                tracing::error!("{}", err);
                GENERIC_FAILURE_REPLY.to_string()
            }
        }
    }

    /// Returns true when Discord rejected the request with 403 Forbidden.
    pub fn is_forbidden(&self) -> bool {
        match self {
            Self::DiscordErr(err) => is_forbidden(err),
            _ => false,
        }
    }
}

/// Returns true when a Serenity error is an HTTP 403 response.
///
/// Distinguishes "DMs closed" or "missing permission" from transient API failures.
pub fn is_forbidden(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_are_shown_verbatim() {
        let err = AppError::from(CommandError::InvalidUserId);
        assert_eq!(
            err.reply_text(),
            "Invalid user ID. Provide a numeric ID or mention."
        );
    }

    #[test]
    fn internal_errors_are_hidden() {
        let err = AppError::from(sea_orm::DbErr::Custom("disk I/O error".to_string()));
        assert_eq!(err.reply_text(), GENERIC_FAILURE_REPLY);
    }

    #[test]
    fn non_discord_errors_are_not_forbidden() {
        let err = AppError::from(sea_orm::DbErr::Custom("locked".to_string()));
        assert!(!err.is_forbidden());
    }
}
