//! Exemption service combining permanent and temporary exemptions.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{blacklist::BlacklistRepository, temp_exempt::TempExemptRepository},
    error::AppError,
    model::{
        blacklist::{AddBlacklistParam, BlacklistEntry},
        temp_exempt::{GrantTempExemptionParam, TempExemption},
    },
};

/// Maximum number of entries shown by `/blacklist list`.
pub const BLACKLIST_LIST_LIMIT: u64 = 50;

/// Bounds for the duration of a temporary exemption, in seconds.
pub const MIN_EXEMPTION_SECONDS: i64 = 5;
pub const MAX_EXEMPTION_SECONDS: i64 = 86_400;

/// Service deciding whether a member is exempt from auto-disconnect.
///
/// A member is exempt when they are on the guild's blacklist or hold an unexpired
/// temporary exemption.
pub struct ExemptionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExemptionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns true when the member must not be auto-disconnected.
    ///
    /// The blacklist is checked first; the temporary exemption check may delete an
    /// expired row as a side effect.
    pub async fn is_exempt(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        if BlacklistRepository::new(self.db)
            .is_blacklisted(guild_id, user_id)
            .await?
        {
            return Ok(true);
        }

        self.has_active_temp_exemption(guild_id, user_id).await
    }

    pub async fn add_blacklist(&self, param: AddBlacklistParam) -> Result<BlacklistEntry, AppError> {
        Ok(BlacklistRepository::new(self.db).add(param).await?)
    }

    pub async fn remove_blacklist(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        Ok(BlacklistRepository::new(self.db)
            .remove(guild_id, user_id)
            .await?)
    }

    /// Lists up to `BLACKLIST_LIST_LIMIT` entries for a guild, newest first.
    pub async fn list_blacklist(&self, guild_id: u64) -> Result<Vec<BlacklistEntry>, AppError> {
        Ok(BlacklistRepository::new(self.db)
            .list(guild_id, BLACKLIST_LIST_LIMIT)
            .await?)
    }

    pub async fn has_active_temp_exemption(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<bool, AppError> {
        Ok(TempExemptRepository::new(self.db)
            .is_active(guild_id, user_id, Utc::now())
            .await?)
    }

    /// Grants a temporary exemption lasting `seconds` from now.
    ///
    /// `seconds` is clamped to the accepted command range so direct callers cannot
    /// create negative or unbounded exemptions.
    pub async fn grant_temp_exemption(
        &self,
        guild_id: u64,
        user_id: u64,
        seconds: i64,
        granted_by: Option<u64>,
        reason: Option<String>,
    ) -> Result<TempExemption, AppError> {
        let seconds = seconds.clamp(MIN_EXEMPTION_SECONDS, MAX_EXEMPTION_SECONDS);
        let expires_at = Utc::now() + Duration::seconds(seconds);

        Ok(TempExemptRepository::new(self.db)
            .grant(GrantTempExemptionParam {
                guild_id,
                user_id,
                expires_at,
                granted_by,
                reason,
            })
            .await?)
    }

    /// Deletes every expired temporary exemption.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        Ok(TempExemptRepository::new(self.db)
            .purge_expired(Utc::now())
            .await?)
    }
}
