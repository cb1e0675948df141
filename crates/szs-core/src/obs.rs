//! Structured observability hooks for the evaluation pipeline.
//!
//! Per-report events are emitted at `trace!`, store/conclusion milestones at
//! `info!`, anomalies at `warn!`. Filter with `RUST_LOG`.

use tracing::{info, trace, warn};

/// RAII guard that tags every event inside it with the source being processed.
///
/// ```ignore
/// let _span = PipelineSpan::enter("Job50527_output.zip", "PUZ");
/// ```
pub struct PipelineSpan {
    _span: tracing::span::EnteredSpan,
}

impl PipelineSpan {
    pub fn enter(source: &str, domain: &str) -> Self {
        let span = tracing::info_span!("szs.pipeline", source = %source, domain = %domain);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_report_extracted(solver: &str, problem: &str, status: &str) {
    trace!(event = "report.extracted", solver = %solver, problem = %problem, status = %status);
}

/// A second report for the same (solver, problem) was skipped.
pub fn emit_duplicate_report(solver: &str, problem: &str) {
    warn!(event = "report.duplicate", solver = %solver, problem = %problem, "keeping first report");
}

pub fn emit_store_built(solvers: usize, problems: usize, records: usize) {
    info!(event = "store.built", solvers, problems, records);
}

pub fn emit_conclusion_built(solvers: usize, problems: usize, shared_problems: usize) {
    info!(event = "conclusion.built", solvers, problems, shared_problems);
}

pub fn emit_contradictions_found(count: usize) {
    if count > 0 {
        warn!(event = "contradictions.found", count);
    } else {
        info!(event = "contradictions.none");
    }
}

/// Problems missing for at least one solver were left out of the shared subset.
pub fn emit_shared_incomplete(incomplete: usize) {
    warn!(event = "shared.incomplete", incomplete, "problems missing for some solver excluded from shared subset");
}

/// The store breaks the same-problem-universe invariant.
pub fn emit_store_inconsistent(error: &dyn std::fmt::Display) {
    warn!(event = "store.inconsistent", error = %error);
}

pub fn emit_artifact_written(kind: &str, path: &std::path::Path) {
    info!(event = "artifact.written", kind = %kind, path = %path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_span_create() {
        let _span = PipelineSpan::enter("job.zip", "PUZ");
        emit_report_extracted("A", "PUZ001+1.p", "Theorem");
    }
}
