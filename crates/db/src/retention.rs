//! Trash retention settings and the periodic purge loop.
//!
//! Shared by the API server (in-process background task) and the standalone
//! worker binary. The loop deletes every `trash_entries` row whose
//! `deleted_at` is strictly older than the retention window. The first pass
//! runs immediately, then once per sweep interval. A failed pass is logged
//! and retried on the next tick; the loop only exits when cancelled.

use std::time::Duration;

use cabinet_core::trash::{RetentionPolicy, DEFAULT_RETENTION_DAYS};
use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::repositories::TrashRepo;

/// Default interval between two retention sweeps: once a day.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Retention window and sweep cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    pub policy: RetentionPolicy,
    pub sweep_interval: Duration,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            policy: RetentionPolicy::default(),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl RetentionConfig {
    /// Load from `TRASH_RETENTION_DAYS` and `TRASH_SWEEP_INTERVAL_SECS`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `TRASH_RETENTION_DAYS` and `TRASH_SWEEP_INTERVAL_SECS` as
    /// returned by `lookup`. Missing keys fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let days: i64 = match lookup("TRASH_RETENTION_DAYS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("TRASH_RETENTION_DAYS must be an integer, got '{raw}'"))?,
            None => DEFAULT_RETENTION_DAYS,
        };
        let policy =
            RetentionPolicy::new(days).map_err(|e| format!("TRASH_RETENTION_DAYS: {e}"))?;

        let interval_secs: u64 = match lookup("TRASH_SWEEP_INTERVAL_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                format!("TRASH_SWEEP_INTERVAL_SECS must be a positive integer, got '{raw}'")
            })?,
            None => DEFAULT_SWEEP_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err("TRASH_SWEEP_INTERVAL_SECS must be greater than 0".into());
        }

        Ok(Self {
            policy,
            sweep_interval: Duration::from_secs(interval_secs),
        })
    }
}

/// Run one purge pass as of now. Returns the number of entries removed.
pub async fn sweep_once(pool: &PgPool, policy: RetentionPolicy) -> Result<u64, sqlx::Error> {
    TrashRepo::purge_expired(pool, policy, Utc::now()).await
}

/// Run the trash retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, config: RetentionConfig, cancel: CancellationToken) {
    let RetentionConfig {
        policy,
        sweep_interval,
    } = config;

    tracing::info!(
        retention_days = policy.retention_days(),
        interval_secs = sweep_interval.as_secs(),
        "Trash retention job started"
    );

    let mut interval = tokio::time::interval(sweep_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Trash retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool, policy).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Trash retention: purged expired entries");
                    }
                    Ok(_) => {
                        tracing::debug!("Trash retention: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Trash retention: purge failed");
                    }
                }
            }
        }
    }
}

/// How a spawned sweep task ended after [`stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    Panicked,
    TimedOut,
}

/// Cancel a spawned [`run`] task and wait up to `grace` for it to finish.
///
/// An in-flight purge is a single statement, so it is allowed to complete.
pub async fn stop(
    cancel: &CancellationToken,
    handle: JoinHandle<()>,
    grace: Duration,
) -> StopOutcome {
    cancel.cancel();
    match tokio::time::timeout(grace, handle).await {
        Ok(Ok(())) => StopOutcome::Stopped,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Trash retention job panicked");
            StopOutcome::Panicked
        }
        Err(_) => {
            tracing::warn!("Trash retention job did not stop within the shutdown timeout");
            StopOutcome::TimedOut
        }
    }
}
