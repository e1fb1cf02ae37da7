//! Application state shared by the event handler, commands and the scheduler.
//!
//! The state is built once in `main` and cloned into the bot's event handler. All fields
//! are cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `reqwest::Client` uses an `Arc` internally
//! - everything else is behind an `Arc`

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use tokio_cron_scheduler::JobScheduler;

use crate::{
    config::Config,
    service::{owner::OwnerResolver, voice_guard::VoiceGuard},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for blacklist and exemption storage.
    pub db: DatabaseConnection,

    pub config: Arc<Config>,

    /// HTTP client for GitHub release lookups.
    pub http_client: reqwest::Client,

    /// Self-deafen enforcement, including outstanding verification tasks.
    pub voice_guard: Arc<VoiceGuard>,

    /// Lazily resolved bot owners.
    pub owners: Arc<OwnerResolver>,

    /// Periodic voice guard sweep.
    ///
    /// Set by the first `ready` event only, so gateway reconnects do not start a second
    /// scheduler.
    pub guard_scheduler: Arc<OnceCell<JobScheduler>>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Arguments
    /// - `db` - Database connection pool with migrations applied
    /// - `config` - Application configuration
    /// - `http_client` - HTTP client for external API requests
    pub fn new(db: DatabaseConnection, config: Config, http_client: reqwest::Client) -> Self {
        let voice_guard = Arc::new(VoiceGuard::new(db.clone(), config.voice_guard.clone()));
        let owners = Arc::new(OwnerResolver::new(config.owner_id));

        Self {
            db,
            config: Arc::new(config),
            http_client,
            voice_guard,
            owners,
            guard_scheduler: Arc::new(OnceCell::new()),
        }
    }
}
