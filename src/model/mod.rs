//! Domain models and operation parameter types.
//!
//! Repositories convert SeaORM entity models into these types at the data-layer boundary,
//! so Discord IDs are `u64` everywhere above the database.

pub mod blacklist;
pub mod temp_exempt;
