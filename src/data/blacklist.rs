//! Blacklist data repository for database operations.
//!
//! This module provides the `BlacklistRepository` for managing permanent auto-disconnect
//! exemptions. Entries are keyed by `(guild_id, user_id)`; adding an existing key replaces
//! the stored reason, author and timestamp.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::blacklist::{AddBlacklistParam, BlacklistEntry};

/// Repository providing database operations for blacklist management.
pub struct BlacklistRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlacklistRepository<'a> {
    /// Creates a new BlacklistRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether a member is blacklisted in a guild.
    ///
    /// # Returns
    /// - `Ok(true)` - An entry exists for the guild and user
    /// - `Ok(false)` - No entry exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn is_blacklisted(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let entry = entity::prelude::Blacklist::find_by_id((guild_id as i64, user_id as i64))
            .one(self.db)
            .await?;

        Ok(entry.is_some())
    }

    /// Adds a member to the blacklist, replacing any existing entry.
    ///
    /// The `added_at` timestamp is always set to the current time, so re-adding a member
    /// moves them to the top of `list`.
    ///
    /// # Arguments
    /// - `param` - Guild, user, author and optional reason
    ///
    /// # Returns
    /// - `Ok(BlacklistEntry)` - The stored entry
    /// - `Err(DbErr)` - Database error during insert
    pub async fn add(&self, param: AddBlacklistParam) -> Result<BlacklistEntry, DbErr> {
        let now = Utc::now();

        let model = entity::blacklist::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id as i64),
            user_id: ActiveValue::Set(param.user_id as i64),
            added_by: ActiveValue::Set(param.added_by.map(|id| id as i64)),
            reason: ActiveValue::Set(param.reason.clone()),
            added_at: ActiveValue::Set(now),
        };

        entity::prelude::Blacklist::insert(model)
            .on_conflict(
                OnConflict::columns([
                    entity::blacklist::Column::GuildId,
                    entity::blacklist::Column::UserId,
                ])
                .update_columns([
                    entity::blacklist::Column::AddedBy,
                    entity::blacklist::Column::Reason,
                    entity::blacklist::Column::AddedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(BlacklistEntry {
            guild_id: param.guild_id,
            user_id: param.user_id,
            added_by: param.added_by,
            reason: param.reason,
            added_at: now,
        })
    }

    /// Removes a member from the blacklist.
    ///
    /// # Returns
    /// - `Ok(true)` - An entry was deleted
    /// - `Ok(false)` - The member was not blacklisted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn remove(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Blacklist::delete_by_id((guild_id as i64, user_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists a guild's blacklist entries, most recently added first.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to list entries for
    /// - `limit` - Maximum number of entries returned
    ///
    /// # Returns
    /// - `Ok(Vec<BlacklistEntry>)` - Up to `limit` entries ordered by `added_at` descending
    /// - `Err(DbErr)` - Database error during query
    pub async fn list(&self, guild_id: u64, limit: u64) -> Result<Vec<BlacklistEntry>, DbErr> {
        let entries = entity::prelude::Blacklist::find()
            .filter(entity::blacklist::Column::GuildId.eq(guild_id as i64))
            .order_by_desc(entity::blacklist::Column::AddedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entries.into_iter().map(BlacklistEntry::from_entity).collect())
    }
}
