//! Factory methods for creating test data.
//!
//! Each table has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let entry = factory::create_blacklist_entry(&db, guild_id, user_id).await?;
//!
//! let expired = factory::temp_exempt::TempExemptFactory::new(&db)
//!     .guild_id(guild_id)
//!     .user_id(user_id)
//!     .expires_in_seconds(-60)
//!     .build()
//!     .await?;
//! ```

pub mod blacklist;
pub mod helpers;
pub mod temp_exempt;

pub use blacklist::create_blacklist_entry;
pub use temp_exempt::create_temp_exempt;
