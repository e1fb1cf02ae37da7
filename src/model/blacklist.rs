//! Domain models for permanent exemptions.

use chrono::{DateTime, Utc};

/// A member permanently exempt from auto-disconnect in one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct BlacklistEntry {
    pub guild_id: u64,
    pub user_id: u64,
    /// Owner who added the entry, if known.
    pub added_by: Option<u64>,
    pub reason: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl BlacklistEntry {
    /// Converts an entity model to a blacklist domain model at the repository boundary.
    pub fn from_entity(entity: entity::blacklist::Model) -> Self {
        Self {
            guild_id: entity.guild_id as u64,
            user_id: entity.user_id as u64,
            added_by: entity.added_by.map(|id| id as u64),
            reason: entity.reason,
            added_at: entity.added_at,
        }
    }
}

/// Parameters for adding (or replacing) a blacklist entry.
#[derive(Debug, Clone)]
pub struct AddBlacklistParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub added_by: Option<u64>,
    pub reason: Option<String>,
}
