use crate::{
    data::temp_exempt::TempExemptRepository, error::AppError,
    model::temp_exempt::GrantTempExemptionParam,
};
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod grant;
mod is_active;
mod purge_expired;
mod remove;
