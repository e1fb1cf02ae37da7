use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot cannot log in without it. `DISCORD_TOKEN` (or the legacy `TOKEN`) is the
    /// only variable without a default.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    ///
    /// Raised for IDs (`OWNER_ID`, `GUILD_ID`) that are not non-zero integers.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The raw value that failed validation
        value: String,
    },
}
