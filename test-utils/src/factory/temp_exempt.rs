//! Temporary exemption factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test temporary exemptions.
///
/// The default expiry is one hour in the future. Use `expires_in_seconds` with a
/// negative value to create an already-expired row.
pub struct TempExemptFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    expires_at: DateTime<Utc>,
    granted_by: Option<u64>,
    reason: Option<String>,
}

impl<'a> TempExemptFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id(),
            user_id: next_id(),
            expires_at: Utc::now() + Duration::hours(1),
            granted_by: None,
            reason: None,
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

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Sets the expiry relative to now; negative values produce an expired row.
    pub fn expires_in_seconds(mut self, seconds: i64) -> Self {
        self.expires_at = Utc::now() + Duration::seconds(seconds);
        self
    }

    pub fn granted_by(mut self, granted_by: Option<u64>) -> Self {
        self.granted_by = granted_by;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Builds and inserts the temporary exemption into the database.
    pub async fn build(self) -> Result<entity::temp_exempt::Model, DbErr> {
        entity::temp_exempt::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id as i64),
            user_id: ActiveValue::Set(self.user_id as i64),
            expires_at: ActiveValue::Set(self.expires_at),
            granted_by: ActiveValue::Set(self.granted_by.map(|id| id as i64)),
            reason: ActiveValue::Set(self.reason),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active (one hour) temporary exemption for the given guild and user.
pub async fn create_temp_exempt(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<entity::temp_exempt::Model, DbErr> {
    TempExemptFactory::new(db)
        .guild_id(guild_id)
        .user_id(user_id)
        .build()
        .await
}
