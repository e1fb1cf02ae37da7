//! SeaORM entity models for the SimpleKick database.

pub mod prelude;

pub mod blacklist;
pub mod temp_exempt;
