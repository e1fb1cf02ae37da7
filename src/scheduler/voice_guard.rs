use std::sync::Arc;

use serenity::all::Context;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::{
        exemption::ExemptionService,
        voice_guard::{VoiceGuard, PERIODIC_SWEEP_REASON},
    },
};

/// Starts the periodic voice guard sweep
///
/// Every `interval` the job:
/// - Deletes expired temporary exemptions
/// - Re-checks every cached voice state and disconnects self-deafened members
///
/// # Arguments
/// - `guard`: Voice guard holding the settings and database connection
/// - `ctx`: Discord context whose cache is swept
///
/// # Returns
/// The running scheduler, kept so it can be shut down on exit
pub async fn start_scheduler(
    guard: Arc<VoiceGuard>,
    ctx: Context,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let interval = guard.settings().interval;
    let delays = guard
        .settings()
        .verify_delays
        .iter()
        .map(|delay| format!("{}s", delay.as_secs_f64()))
        .collect::<Vec<_>>()
        .join(", ");

    let job_guard = guard.clone();
    let job_ctx = ctx.clone();

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let guard = job_guard.clone();
        let ctx = job_ctx.clone();

        Box::pin(async move {
            if let Err(e) = run_sweep(&guard, &ctx).await {
                tracing::error!("Error running voice guard sweep: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Enhanced voice guard enabled (interval={}s, delays={})",
        interval.as_secs(),
        delays
    );

    Ok(scheduler)
}

/// Purges expired exemptions, then sweeps voice states
async fn run_sweep(guard: &VoiceGuard, ctx: &Context) -> Result<(), AppError> {
    let purged = ExemptionService::new(guard.db()).purge_expired().await?;
    if purged > 0 {
        tracing::debug!("Purged {} expired temporary exemption(s)", purged);
    }

    guard.scan_voice_states(ctx, PERIODIC_SWEEP_REASON).await;

    Ok(())
}
