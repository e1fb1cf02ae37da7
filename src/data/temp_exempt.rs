//! Temporary exemption data repository.
//!
//! Expired rows are removed lazily: `is_active` deletes the row it finds expired, and
//! `purge_expired` clears everything past its expiry in one statement during the
//! periodic guard sweep.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::temp_exempt::{GrantTempExemptionParam, TempExemption};

/// Repository providing database operations for temporary exemptions.
pub struct TempExemptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TempExemptRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grants a temporary exemption, replacing any existing one for the member.
    ///
    /// # Returns
    /// - `Ok(TempExemption)` - The stored exemption
    /// - `Err(DbErr)` - Database error during insert
    pub async fn grant(&self, param: GrantTempExemptionParam) -> Result<TempExemption, DbErr> {
        let model = entity::temp_exempt::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id as i64),
            user_id: ActiveValue::Set(param.user_id as i64),
            expires_at: ActiveValue::Set(param.expires_at),
            granted_by: ActiveValue::Set(param.granted_by.map(|id| id as i64)),
            reason: ActiveValue::Set(param.reason.clone()),
        };

        entity::prelude::TempExempt::insert(model)
            .on_conflict(
                OnConflict::columns([
                    entity::temp_exempt::Column::GuildId,
                    entity::temp_exempt::Column::UserId,
                ])
                .update_columns([
                    entity::temp_exempt::Column::ExpiresAt,
                    entity::temp_exempt::Column::GrantedBy,
                    entity::temp_exempt::Column::Reason,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(TempExemption {
            guild_id: param.guild_id,
            user_id: param.user_id,
            expires_at: param.expires_at,
            granted_by: param.granted_by,
            reason: param.reason,
        })
    }

    /// Gets the stored exemption for a member, whether or not it has expired.
    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<TempExemption>, DbErr> {
        let entity = entity::prelude::TempExempt::find_by_id((guild_id as i64, user_id as i64))
            .one(self.db)
            .await?;

        Ok(entity.map(TempExemption::from_entity))
    }

    /// Removes a member's temporary exemption.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - The member had no exemption
    pub async fn remove(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result =
            entity::prelude::TempExempt::delete_by_id((guild_id as i64, user_id as i64))
                .exec(self.db)
                .await?;

        Ok(result.rows_affected > 0)
    }

    /// Checks whether a member currently holds an unexpired exemption.
    ///
    /// An exemption whose `expires_at` is at or before `now` is deleted and reported
    /// as inactive.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the exemption applies to
    /// - `user_id` - Exempted member
    /// - `now` - Reference instant for the expiry check
    ///
    /// # Returns
    /// - `Ok(true)` - Exemption exists and has not expired
    /// - `Ok(false)` - No exemption, or it expired and was removed
    /// - `Err(DbErr)` - Database error during query or delete
    pub async fn is_active(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let Some(exemption) = self.find(guild_id, user_id).await? else {
            return Ok(false);
        };

        if exemption.is_active_at(now) {
            return Ok(true);
        }

        self.remove(guild_id, user_id).await?;

        Ok(false)
    }

    /// Deletes every exemption that has expired at `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::TempExempt::delete_many()
            .filter(entity::temp_exempt::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
