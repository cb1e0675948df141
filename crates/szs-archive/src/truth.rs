//! Ground-truth loading from a TPTP problem library.

use szs_core::{GroundTruth, GroundTruthConfig};
use tracing::info;

use crate::source::{read_text, ReportSource};
use crate::Result;

/// Read every file of `source` and record its header status under the file's
/// base name (`Problems/PUZ/PUZ001+1.p` → `PUZ001+1.p`).
///
/// Files without a status line (axiom sets, documentation) are skipped.
pub fn load_ground_truth(source: &ReportSource, config: &GroundTruthConfig) -> Result<GroundTruth> {
    let mut truth = GroundTruth::new();
    let mut unlabelled = 0usize;

    source.visit_files(|name, reader| {
        let problem = name.rsplit('/').next().unwrap_or(name);
        let text = read_text(name, reader)?;
        if !truth.load(problem, &text, config) {
            unlabelled += 1;
        }
        Ok(())
    })?;

    info!(
        event = "ground_truth.loaded",
        source = %source.path().display(),
        problems = truth.len(),
        unlabelled,
    );
    Ok(truth)
}
