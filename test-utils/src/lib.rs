//! SimpleKick Test Utils
//!
//! Provides shared testing utilities for the SimpleKick bot. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases, factories for
//! inserting exemption rows, and helpers for building Serenity gateway objects from JSON.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Insert `blacklist` / `temp_exempt` rows with sensible defaults
//! - **serenity**: Build `VoiceState` and `User` objects the way the gateway sends them
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_blacklist_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_exemption_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
