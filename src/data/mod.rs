//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `crate::model`, keeping entity types out of the service and bot layers.

pub mod blacklist;
pub mod temp_exempt;

#[cfg(test)]
mod test;
