//! Discord bot integration.
//!
//! The bot watches voice state updates to disconnect self-deafened members, serves the
//! slash commands in `command`, and accepts an owner-only `!sync` in direct messages.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild data for the cache
//! - `GUILD_MEMBERS` - Member data to tell bots from users (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice state updates and cached voice states
//! - `DIRECT_MESSAGES` - The `!sync` prefix command
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
