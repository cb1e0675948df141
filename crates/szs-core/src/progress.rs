//! Progress state for long archive runs.
//!
//! A [`Progress`] is created by the caller and handed to whatever reads
//! reports; there is no process-wide counter. Counters are atomic so one
//! instance can be shared across concurrent archive readers.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// Processed-report counter with a projected completion time.
#[derive(Debug)]
pub struct Progress {
    expected: u64,
    interval: u64,
    processed: AtomicU64,
    started_at: DateTime<Utc>,
}

impl Progress {
    /// Track `expected` reports, logging every `interval` reports (0 disables logging).
    pub fn new(expected: u64, interval: u64) -> Self {
        Self::starting_at(expected, interval, Utc::now())
    }

    pub fn starting_at(expected: u64, interval: u64, started_at: DateTime<Utc>) -> Self {
        Self {
            expected,
            interval,
            processed: AtomicU64::new(0),
            started_at,
        }
    }

    /// Count one processed report and log when an interval boundary is hit.
    pub fn inc(&self, label: &str) -> u64 {
        let done = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval > 0 && done % self.interval == 0 {
            self.report(label);
        }
        done
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    /// Completed fraction in `0.0..=1.0`; `None` when nothing is expected.
    pub fn fraction(&self) -> Option<f64> {
        if self.expected == 0 {
            return None;
        }
        Some((self.processed() as f64 / self.expected as f64).min(1.0))
    }

    /// Projected completion time, extrapolating the elapsed time linearly.
    pub fn eta(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let fraction = self.fraction().filter(|f| *f > 0.0)?;
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(0) as f64;
        let remaining_ms = elapsed_ms / fraction * (1.0 - fraction);
        Some(now + Duration::milliseconds(remaining_ms.round() as i64))
    }

    /// Emit the current progress as a single `info!` event.
    pub fn report(&self, label: &str) {
        let now = Utc::now();
        let percent = self.fraction().map(|f| (f * 10_000.0).round() / 100.0);
        match (percent, self.eta(now)) {
            (Some(percent), Some(eta)) => tracing::info!(
                event = "progress",
                label = %label,
                processed = self.processed(),
                percent,
                expected_finish = %eta.to_rfc3339(),
            ),
            _ => tracing::info!(event = "progress", label = %label, processed = self.processed()),
        }
    }
}
