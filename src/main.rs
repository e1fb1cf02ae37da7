mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use crate::{config::Config, error::AppError, service::update, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client()?;

    if startup::apply_pending_update(&config, &http_client).await {
        update::restart()?;
        return Ok(());
    }

    let db = startup::connect_to_database(&config).await?;

    let state = AppState::new(db, config, http_client);

    tracing::info!("Starting SimpleKick {}", state.config.bot_version);

    let client = bot::start::init_bot(state.clone()).await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        tracing::info!("Shutting down");
        shard_manager.shutdown_all().await;
    });

    let result = bot::start::start_bot(client).await;

    state.voice_guard.shutdown();
    if let Some(scheduler) = state.guard_scheduler.get() {
        scheduler.clone().shutdown().await?;
    }

    result
}
