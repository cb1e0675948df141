//! Structured outcome of a single solver report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One report's result: the raw SZS status plus a value for every configured topic.
///
/// # Invariants
///
/// `metrics` holds an entry for every topic the record was built with. Missing
/// data is `f64::NAN`, never an absent key, so averaging treats every record the
/// same way. Records are immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    status: String,
    metrics: BTreeMap<String, f64>,
}

impl OutcomeRecord {
    /// Build a record from a status and `(topic, value)` pairs.
    pub fn new(status: impl Into<String>, metrics: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            status: status.into(),
            metrics: metrics.into_iter().collect(),
        }
    }

    /// A record whose every topic is not-a-number.
    pub fn without_metrics(status: impl Into<String>, topics: &[String]) -> Self {
        Self::new(status, topics.iter().map(|t| (t.clone(), f64::NAN)))
    }

    /// Raw status tag; empty when the report carried no status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Value of `topic`, `NaN` when the topic was absent or never configured.
    pub fn metric(&self, topic: &str) -> f64 {
        self.metrics.get(topic).copied().unwrap_or(f64::NAN)
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
}
