//! szs-core: evaluation pipeline for automated theorem prover benchmark runs.
//!
//! Turns raw solver reports into [`OutcomeRecord`]s, collects them in an
//! [`EvaluationStore`], aggregates per-category statistics into a
//! [`Conclusion`], and checks solver claims against [`GroundTruth`].

pub mod aggregate;
pub mod contradiction;
pub mod domain;
pub mod extract;
pub mod ground_truth;
pub mod obs;
pub mod progress;
pub mod reporting;
pub mod store;
pub mod telemetry;

pub use aggregate::{aggregate, nan_mean, shared_subset};
pub use contradiction::{find_contradictions, statuses_conflict, Contradiction, ContradictionVerdict};
pub use domain::{
    CategorySummary, Conclusion, OutcomeRecord, Result, PROBLEMS_KEY, StatusCategory, SubsetMode, SubsetSummary,
    SzsError,
};
pub use extract::{extract_record, extract_status, ExtractorConfig, ReportScanner};
pub use ground_truth::{extract_truth, GroundTruth, GroundTruthConfig};
pub use obs::PipelineSpan;
pub use progress::Progress;
pub use reporting::{
    render_conclusion_md, render_contradictions_md, render_records_csv, render_records_json,
    write_conclusion_json, write_records_csv, write_text, ConclusionArtifact, SourceDigest,
};
pub use store::{problem_domain, EvaluationStore, ExtractedReport, InsertOutcome, RawReport};
pub use telemetry::init_tracing;

/// szs-core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
