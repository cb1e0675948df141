//! Record extraction from raw solver reports.
//!
//! Reports are flat, append-only text with one `key : value` pair per line
//! and a single SZS status line. [`ReportScanner`] splits the text into lines
//! once and indexes the key/value lines in first-occurrence order;
//! [`extract_record`] turns that index into an [`OutcomeRecord`].

use serde::{Deserialize, Serialize};

use crate::domain::status::{INAPPROPRIATE, RESOURCE_OUT};
use crate::domain::{OutcomeRecord, Result, SzsError};

/// Status marker emitted by SZS-compliant provers.
pub const DEFAULT_STATUS_MARKER: &str = "SZS status";

/// Configuration for the record extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Marker that precedes the status tag on the status line.
    pub status_marker: String,

    /// Ordered metric topics to extract.
    pub topics: Vec<String>,

    /// Statuses for which the prover did no search, so no metric is read.
    pub no_computation: Vec<String>,

    /// Unit suffix character removed from metric values before parsing.
    pub unit_suffix: char,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            status_marker: DEFAULT_STATUS_MARKER.to_string(),
            topics: vec!["Resolvents computed".to_string(), "User time".to_string()],
            no_computation: vec![RESOURCE_OUT.to_string(), INAPPROPRIATE.to_string()],
            unit_suffix: 's',
        }
    }
}

impl ExtractorConfig {
    /// Config with the default markers and the given topics.
    pub fn with_topics(topics: Vec<String>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Whether a report with `status` carries metrics worth reading.
    pub fn computes_metrics(&self, status: &str) -> bool {
        !status.is_empty() && !self.no_computation.iter().any(|s| s == status)
    }
}

/// Line index over one report's text.
#[derive(Debug, Clone)]
pub struct ReportScanner<'a> {
    lines: Vec<&'a str>,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> ReportScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines: Vec<&'a str> = text.lines().collect();
        let entries = lines.iter().filter_map(|line| split_entry(line)).collect();
        Self { lines, entries }
    }

    /// Remainder of the first line containing `marker`, past the single
    /// separator character that follows the marker.
    ///
    /// Returns `None` when no line contains the marker.
    pub fn after_marker(&self, marker: &str) -> Option<&'a str> {
        let line = self.line_containing(marker)?;
        let start = line.find(marker)? + marker.len();
        let rest = &line[start..];
        let skip = rest.chars().next().map_or(0, char::len_utf8);
        Some(&rest[skip..])
    }

    /// First line containing `marker`.
    pub fn line_containing(&self, marker: &str) -> Option<&'a str> {
        self.lines.iter().copied().find(|line| line.contains(marker))
    }

    /// Raw value of the first entry, in line order, whose key contains `topic`.
    pub fn value(&self, topic: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(key, _)| key.contains(topic))
            .map(|(_, value)| *value)
    }
}

/// Split `line` into a normalised key and the raw value after the first colon.
///
/// Anything up to and including a `#` or `%` comment marker is dropped from
/// the key. Without a marker, a leading StarExec `cpu/wall` column is dropped.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = match key.find(['#', '%']) {
        Some(idx) => &key[idx + 1..],
        None => strip_timestamp(key),
    };
    let key = key.trim_matches(|c: char| c.is_whitespace() || c == '#' || c == '%');
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// `0.00/0.05\tUser time` → `User time`.
fn strip_timestamp(key: &str) -> &str {
    match key.split_once('\t') {
        Some((stamp, rest))
            if !stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '/') =>
        {
            rest
        }
        _ => key,
    }
}

/// Extract the status tag from a report, or an empty string when the marker is absent.
pub fn extract_status(text: &str, marker: &str) -> String {
    ReportScanner::new(text)
        .after_marker(marker)
        .unwrap_or_default()
        .to_string()
}

/// Parse a raw metric value, dropping every `unit` character.
///
/// The report format appends a unit such as `3.5s` or `0.010 s`.
pub fn parse_metric(topic: &str, raw: &str, unit: char) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != unit).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| SzsError::MalformedMetric {
            topic: topic.to_string(),
            raw: raw.to_string(),
        })
}

/// Turn one report into an [`OutcomeRecord`].
///
/// Missing fields degrade to an empty status or `NaN` metrics. A metric that
/// is present but not numeric is a hard [`SzsError::MalformedMetric`].
pub fn extract_record(text: &str, config: &ExtractorConfig) -> Result<OutcomeRecord> {
    let scanner = ReportScanner::new(text);
    let status = scanner
        .after_marker(&config.status_marker)
        .unwrap_or_default()
        .to_string();

    if !config.computes_metrics(&status) {
        return Ok(OutcomeRecord::without_metrics(status, &config.topics));
    }

    let mut metrics = Vec::with_capacity(config.topics.len());
    for topic in &config.topics {
        let value = match scanner.value(topic) {
            Some(raw) => parse_metric(topic, raw, config.unit_suffix)?,
            None => f64::NAN,
        };
        metrics.push((topic.clone(), value));
    }
    Ok(OutcomeRecord::new(status, metrics))
}
