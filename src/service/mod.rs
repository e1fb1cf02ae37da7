//! Business logic between the bot layer and the repositories.
//!
//! - `exemption` - Blacklist and temporary exemption rules
//! - `voice_guard` - Self-deafen detection, disconnects and verification passes
//! - `owner` - Resolving who the bot owner is
//! - `notify` - Direct messages to members and the owner
//! - `version` - GitHub release lookup and version comparison
//! - `update` - Startup update check, git based self-update and restart

pub mod exemption;
pub mod notify;
pub mod owner;
pub mod update;
pub mod version;
pub mod voice_guard;
