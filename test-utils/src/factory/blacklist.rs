//! Blacklist factory for creating permanent exemption rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test blacklist entries with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let entry = BlacklistFactory::new(&db)
///     .guild_id(1)
///     .user_id(2)
///     .reason("streams muted")
///     .build()
///     .await?;
/// ```
pub struct BlacklistFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    added_by: Option<u64>,
    reason: Option<String>,
    added_at: DateTime<Utc>,
}

impl<'a> BlacklistFactory<'a> {
    /// Creates a new BlacklistFactory with default values.
    ///
    /// Defaults:
    /// - guild_id / user_id: unique generated snowflakes
    /// - added_by: `None`
    /// - reason: `None`
    /// - added_at: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id(),
            user_id: next_id(),
            added_by: None,
            reason: None,
            added_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn added_by(mut self, added_by: Option<u64>) -> Self {
        self.added_by = added_by;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the insertion timestamp, used to control list ordering in tests.
    pub fn added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Builds and inserts the blacklist entry into the database.
    pub async fn build(self) -> Result<entity::blacklist::Model, DbErr> {
        entity::blacklist::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id as i64),
            user_id: ActiveValue::Set(self.user_id as i64),
            added_by: ActiveValue::Set(self.added_by.map(|id| id as i64)),
            reason: ActiveValue::Set(self.reason),
            added_at: ActiveValue::Set(self.added_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a blacklist entry for the given guild and user with default values.
pub async fn create_blacklist_entry(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<entity::blacklist::Model, DbErr> {
    BlacklistFactory::new(db)
        .guild_id(guild_id)
        .user_id(user_id)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_entry_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(Blacklist)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let entry = BlacklistFactory::new(db).build().await?;

        assert!(entry.guild_id > 0);
        assert!(entry.user_id > 0);
        assert!(entry.added_by.is_none());
        assert!(entry.reason.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_entry_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(Blacklist)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let entry = BlacklistFactory::new(db)
            .guild_id(10)
            .user_id(20)
            .added_by(Some(30))
            .reason("music bot")
            .build()
            .await?;

        assert_eq!(entry.guild_id, 10);
        assert_eq!(entry.user_id, 20);
        assert_eq!(entry.added_by, Some(30));
        assert_eq!(entry.reason.as_deref(), Some("music bot"));

        Ok(())
    }
}
