//! Ground-truth status labels read from TPTP problem headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extract::ReportScanner;

/// Marker of the status line in a TPTP problem header (`% Status   : Theorem`).
pub const DEFAULT_TRUTH_MARKER: &str = "Status";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTruthConfig {
    pub marker: String,
}

impl Default for GroundTruthConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_TRUTH_MARKER.to_string(),
        }
    }
}

/// Extract the ground-truth label of one problem, or an empty string when the
/// marker is absent. Spaces and colons between marker and line end are dropped.
pub fn extract_truth(text: &str, config: &GroundTruthConfig) -> String {
    let scanner = ReportScanner::new(text);
    let Some(line) = scanner.line_containing(&config.marker) else {
        return String::new();
    };
    let start = line.find(config.marker.as_str()).map_or(0, |i| i + config.marker.len());
    line[start..]
        .chars()
        .filter(|c| *c != ' ' && *c != ':')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Problem identifier → authoritative status label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundTruth {
    statuses: BTreeMap<String, String>,
}

impl GroundTruth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the label from `text` and record it for `problem`.
    ///
    /// Problems whose text carries no marker are not recorded; returns whether
    /// a label was stored.
    pub fn load(&mut self, problem: impl Into<String>, text: &str, config: &GroundTruthConfig) -> bool {
        let status = extract_truth(text, config);
        if status.is_empty() {
            return false;
        }
        self.statuses.insert(problem.into(), status);
        true
    }

    pub fn insert(&mut self, problem: impl Into<String>, status: impl Into<String>) {
        self.statuses.insert(problem.into(), status.into());
    }

    pub fn get(&self, problem: &str) -> Option<&str> {
        self.statuses.get(problem).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl FromIterator<(String, String)> for GroundTruth {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}
