//! Environment-driven configuration.
//!
//! All settings come from environment variables (optionally loaded from a `.env` file by
//! `dotenvy` in `main`). `Config::from_lookup` accepts any key lookup so tests can feed a
//! fixed map instead of touching the process environment.

use std::time::Duration;

use crate::error::{config::ConfigError, AppError};
use crate::util::parse::{parse_bool, parse_delays, parse_int, parse_snowflake};

const DEFAULT_DB_PATH: &str = "blacklist.db";
const DEFAULT_GITHUB_REPO: &str = "akikohatsune/simplekick";
const DEFAULT_PRESENCE_TEXT: &str = "Auto-disconnect self-deafen";

const DEFAULT_GUARD_INTERVAL_SECONDS: u64 = 45;
const MIN_GUARD_INTERVAL_SECONDS: u64 = 10;
const DEFAULT_VERIFY_DELAYS_SECONDS: [f64; 2] = [2.0, 5.0];

/// Settings for the self-deafen enforcement layer.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceGuardConfig {
    /// Enables verification passes and the periodic sweep.
    pub enhanced: bool,
    /// Time between periodic sweeps of every guild.
    pub interval: Duration,
    /// Delays, applied in sequence, before each re-verification of a member.
    pub verify_delays: Vec<Duration>,
}

impl Default for VoiceGuardConfig {
    fn default() -> Self {
        Self {
            enhanced: true,
            interval: Duration::from_secs(DEFAULT_GUARD_INTERVAL_SECONDS),
            verify_delays: DEFAULT_VERIFY_DELAYS_SECONDS
                .iter()
                .copied()
                .map(Duration::from_secs_f64)
                .collect(),
        }
    }
}

pub struct Config {
    pub discord_token: String,
    pub database_url: String,

    /// Guild to sync slash commands to on startup; global sync when unset.
    pub sync_guild_id: Option<u64>,
    /// Bot owner; the application owner (or team) is used when unset.
    pub owner_id: Option<u64>,

    pub bot_version: String,
    pub github_repo: String,
    pub presence_text: String,
    pub auto_update: bool,

    pub voice_guard: VoiceGuardConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN")
            .or_else(|| get("TOKEN"))
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let path = get("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
                format!("sqlite://{}?mode=rwc", path)
            }
        };

        let sync_guild_id = match get("GUILD_ID") {
            Some(value) => Some(parse_id_var("GUILD_ID", value)?),
            None => get("SYNC_GUILD_ID")
                .map(|value| parse_id_var("SYNC_GUILD_ID", value))
                .transpose()?,
        };
        let owner_id = get("OWNER_ID")
            .map(|value| parse_id_var("OWNER_ID", value))
            .transpose()?;

        let voice_guard = VoiceGuardConfig {
            enhanced: parse_bool(get("VOICE_ENHANCED_GUARD").as_deref(), true),
            interval: Duration::from_secs(parse_int(
                get("VOICE_GUARD_INTERVAL_SECONDS").as_deref(),
                DEFAULT_GUARD_INTERVAL_SECONDS,
                MIN_GUARD_INTERVAL_SECONDS,
            )),
            verify_delays: parse_delays(
                get("VOICE_VERIFY_DELAYS_SECONDS").as_deref(),
                &DEFAULT_VERIFY_DELAYS_SECONDS,
            ),
        };

        Ok(Self {
            discord_token,
            database_url,
            sync_guild_id,
            owner_id,
            bot_version: get("BOT_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            // An explicitly empty GITHUB_REPO disables version checks.
            github_repo: lookup("GITHUB_REPO")
                .unwrap_or_else(|| DEFAULT_GITHUB_REPO.to_string())
                .trim()
                .to_string(),
            presence_text: lookup("PRESENCE_TEXT")
                .unwrap_or_else(|| DEFAULT_PRESENCE_TEXT.to_string()),
            auto_update: parse_bool(get("AUTO_UPDATE").as_deref(), false),
            voice_guard,
        })
    }
}

fn parse_id_var(name: &str, value: String) -> Result<u64, ConfigError> {
    parse_snowflake(&value).ok_or(ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn requires_a_token() {
        let result = config_from(&[]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(ref name))) if name == "DISCORD_TOKEN"
        ));
    }

    #[test]
    fn falls_back_to_legacy_token_name() {
        let config = config_from(&[("TOKEN", "abc")]).unwrap();
        assert_eq!(config.discord_token, "abc");
    }

    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(config.database_url, "sqlite://blacklist.db?mode=rwc");
        assert_eq!(config.sync_guild_id, None);
        assert_eq!(config.owner_id, None);
        assert_eq!(config.bot_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.github_repo, "akikohatsune/simplekick");
        assert_eq!(config.presence_text, "Auto-disconnect self-deafen");
        assert!(!config.auto_update);
        assert_eq!(config.voice_guard, VoiceGuardConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DB_PATH", "/data/kick.db"),
            ("SYNC_GUILD_ID", "42"),
            ("OWNER_ID", "7"),
            ("BOT_VERSION", "2.0.0"),
            ("GITHUB_REPO", " someone/fork "),
            ("AUTO_UPDATE", "yes"),
            ("VOICE_ENHANCED_GUARD", "off"),
            ("VOICE_GUARD_INTERVAL_SECONDS", "5"),
            ("VOICE_VERIFY_DELAYS_SECONDS", "1,3"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite:///data/kick.db?mode=rwc");
        assert_eq!(config.sync_guild_id, Some(42));
        assert_eq!(config.owner_id, Some(7));
        assert_eq!(config.bot_version, "2.0.0");
        assert_eq!(config.github_repo, "someone/fork");
        assert!(config.auto_update);
        assert!(!config.voice_guard.enhanced);
        assert_eq!(config.voice_guard.interval, Duration::from_secs(10));
        assert_eq!(
            config.voice_guard.verify_delays,
            vec![Duration::from_secs(1), Duration::from_secs(3)]
        );
    }

    #[test]
    fn guild_id_takes_precedence_over_sync_guild_id() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("GUILD_ID", "1"),
            ("SYNC_GUILD_ID", "2"),
        ])
        .unwrap();
        assert_eq!(config.sync_guild_id, Some(1));
    }

    #[test]
    fn database_url_overrides_db_path() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DB_PATH", "ignored.db"),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn empty_repo_disables_version_checks() {
        let config = config_from(&[("DISCORD_TOKEN", "abc"), ("GITHUB_REPO", "")]).unwrap();
        assert!(config.github_repo.is_empty());
    }

    #[test]
    fn rejects_non_numeric_owner() {
        let result = config_from(&[("DISCORD_TOKEN", "abc"), ("OWNER_ID", "me")]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { ref name, .. })) if name == "OWNER_ID"
        ));
    }
}
