//! Domain models for temporary exemptions.

use chrono::{DateTime, Utc};

/// A time-limited exemption from auto-disconnect.
#[derive(Debug, Clone, PartialEq)]
pub struct TempExemption {
    pub guild_id: u64,
    pub user_id: u64,
    /// The exemption stops applying at this instant (inclusive).
    pub expires_at: DateTime<Utc>,
    pub granted_by: Option<u64>,
    pub reason: Option<String>,
}

impl TempExemption {
    /// Converts an entity model to a temporary exemption domain model.
    pub fn from_entity(entity: entity::temp_exempt::Model) -> Self {
        Self {
            guild_id: entity.guild_id as u64,
            user_id: entity.user_id as u64,
            expires_at: entity.expires_at,
            granted_by: entity.granted_by.map(|id| id as u64),
            reason: entity.reason,
        }
    }

    /// Returns true while the exemption still applies at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Parameters for granting (or replacing) a temporary exemption.
#[derive(Debug, Clone)]
pub struct GrantTempExemptionParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub expires_at: DateTime<Utc>,
    pub granted_by: Option<u64>,
    pub reason: Option<String>,
}
