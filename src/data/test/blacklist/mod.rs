use crate::{
    data::blacklist::BlacklistRepository, error::AppError,
    model::blacklist::AddBlacklistParam,
};
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod is_blacklisted;
mod list;
mod remove;
