//! Daily trigger for the selection engine.
//!
//! Runs once at startup (unless disabled), then once per day at a fixed UTC
//! time of day, until the shutdown signal flips.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::ScheduleConfig;
use crate::engine::SelectionEngine;

/// Time from `now` until the next occurrence of `at` (UTC). If `now` is
/// exactly `at`, the next occurrence is tomorrow's.
pub fn duration_until_next(now: DateTime<Utc>, at: NaiveTime) -> Duration {
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        match now.date_naive().checked_add_days(Days::new(1)) {
            Some(tomorrow) => tomorrow.and_time(at).and_utc(),
            None => return Duration::MAX,
        }
    };
    (next - now).to_std().unwrap_or_default()
}

pub struct DailyScheduler {
    engine: Arc<SelectionEngine>,
    run_at: NaiveTime,
    run_on_startup: bool,
}

impl DailyScheduler {
    pub fn new(engine: Arc<SelectionEngine>, config: &ScheduleConfig) -> Self {
        Self {
            engine,
            run_at: config.daily_at,
            run_on_startup: config.run_on_startup,
        }
    }

    /// Run on a background task.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Loop until `shutdown` carries `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(run_at = %self.run_at, "scheduler started");

        if self.run_on_startup {
            self.trigger("startup").await;
        }

        loop {
            if *shutdown.borrow() {
                break;
            }

            let wait = duration_until_next(Utc::now(), self.run_at);
            tracing::debug!(wait_secs = wait.as_secs(), "next daily selection scheduled");

            tokio::select! {
                _ = tokio::time::sleep(wait) => self.trigger("schedule").await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("scheduler stopped");
    }

    async fn trigger(&self, trigger: &'static str) {
        match self.engine.ensure_today().await {
            Ok(outcome) => tracing::info!(trigger, ?outcome, "daily selection run finished"),
            Err(e) => tracing::error!(trigger, error = %e, "daily selection run failed"),
        }
    }
}
