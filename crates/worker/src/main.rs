//! Standalone trash retention worker.
//!
//! Runs the same purge as the API's background sweep, for deployments that
//! schedule it outside the API process (cron, a Kubernetes CronJob).
//!
//! ```text
//! cabinet-worker          # loop until SIGINT / SIGTERM
//! cabinet-worker --once   # single pass, exit with the result
//! ```
//!
//! Reads `DATABASE_URL`, `TRASH_RETENTION_DAYS` (default 30) and
//! `TRASH_SWEEP_INTERVAL_SECS` (default 86400).

use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use cabinet_db::retention::{self, RetentionConfig, StopOutcome};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long an in-flight purge gets to finish after a stop signal.
const SHUTDOWN_GRACE_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cabinet_worker=debug,cabinet_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let once = std::env::args().skip(1).any(|arg| arg == "--once");

    let config = RetentionConfig::from_env().map_err(|msg| anyhow!(msg))?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = cabinet_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    cabinet_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if once {
        let deleted = retention::sweep_once(&pool, config.policy)
            .await
            .context("Trash purge failed")?;
        tracing::info!(
            deleted,
            retention_days = config.policy.retention_days(),
            "Single trash purge pass complete"
        );
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let worker = tokio::spawn(retention::run(pool, config, cancel.clone()));

    shutdown_signal().await;
    if retention::stop(&cancel, worker, Duration::from_secs(SHUTDOWN_GRACE_SECS)).await
        != StopOutcome::Stopped
    {
        bail!("Trash retention job did not shut down cleanly");
    }

    tracing::info!("Worker stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, stopping"),
        () = terminate => tracing::info!("Received SIGTERM, stopping"),
    }
}
