//! Test factories for creating Serenity gateway objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's gateway would deliver. Use them to drive voice-state and command logic
//! without a live connection.
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_voice_state, create_test_user};
//!
//! let old = create_test_voice_state(1, 2, Some(3), false);
//! let new = create_test_voice_state(1, 2, Some(3), true);
//! let user = create_test_user(2, "listener", false);
//! ```

pub mod user;
pub mod voice_state;

pub use user::create_test_user;
pub use voice_state::create_test_voice_state;
