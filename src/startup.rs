use std::time::Duration;

use crate::{
    config::Config,
    error::AppError,
    service::update::{check_for_updates, perform_update},
};

const USER_AGENT: &str = "simplekick-version-check";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, switches the database to WAL journaling so event handlers and the
/// periodic sweep can read while another task writes, then runs all pending SeaORM
/// migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, ConnectionTrait, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for GitHub API requests.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?)
}

/// Checks for a newer release and applies it when auto-update is enabled.
///
/// Returns true when an update was installed and the process should restart. Lookup
/// and update failures are logged and never stop startup.
pub async fn apply_pending_update(config: &Config, http_client: &reqwest::Client) -> bool {
    if config.github_repo.is_empty() {
        return false;
    }

    let Some(release) =
        check_for_updates(http_client, &config.bot_version, &config.github_repo).await
    else {
        return false;
    };

    if !config.auto_update {
        tracing::info!("AUTO_UPDATE is disabled; run the update manually.");
        return false;
    }

    tracing::info!("Updating to {}", release.tag);
    perform_update(&release.tag).await
}
