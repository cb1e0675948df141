use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::contradiction::ContradictionVerdict;
use crate::domain::{Conclusion, SubsetMode, SzsError};
use crate::obs;
use crate::store::EvaluationStore;

pub const SCHEMA_VERSION: &str = "1.0";

/// Domain label used for a conclusion over every problem.
pub const ALL_DOMAINS: &str = "*";

/// Digest of one archive the conclusion was computed from.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceDigest {
    pub path: String,
    pub sha256: String,
}

/// Conclusion artifact written per problem domain (`<domain>.json`).
#[derive(Debug, Clone, Serialize)]
pub struct ConclusionArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub domain: String,
    pub solvers: Vec<String>,
    pub topics: Vec<String>,
    pub sources: Vec<SourceDigest>,
    pub conclusion: Conclusion,
}

impl ConclusionArtifact {
    pub fn new(
        domain: impl Into<String>,
        solvers: Vec<String>,
        topics: Vec<String>,
        sources: Vec<SourceDigest>,
        conclusion: Conclusion,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            domain: domain.into(),
            solvers,
            topics,
            sources,
            conclusion,
        }
    }

    /// File name for this artifact; the all-domains artifact is `conclusion.json`.
    pub fn file_stem(&self) -> &str {
        if self.domain == ALL_DOMAINS {
            "conclusion"
        } else {
            &self.domain
        }
    }
}

/// Write a conclusion artifact as pretty JSON.
pub fn write_conclusion_json(path: &Path, artifact: &ConclusionArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize conclusion artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    obs::emit_artifact_written("conclusion_json", path);
    Ok(())
}

fn fmt_mean(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.3}", value)
    }
}

/// Render a Markdown table per category with counts and means for both subsets.
pub fn render_conclusion_md(artifact: &ConclusionArtifact) -> String {
    let mut out = format!("# Conclusion: {}\n\n", artifact.domain);
    out.push_str(&format!("- solvers: {}\n", artifact.solvers.join(", ")));
    out.push_str(&format!("- topics: {}\n", artifact.topics.join(", ")));

    for (category, summary) in artifact.conclusion.iter() {
        out.push_str(&format!("\n## {}\n\n", category));
        out.push_str("| subset | solver | problems |");
        for topic in &artifact.topics {
            out.push_str(&format!(" {} |", topic));
        }
        out.push_str("\n|---|---|---|");
        for _ in &artifact.topics {
            out.push_str("---|");
        }
        out.push('\n');

        for mode in SubsetMode::ALL {
            let cell = summary.subset(mode);
            for solver in &artifact.solvers {
                out.push_str(&format!("| {} | {} | {} |", mode, solver, cell.count(solver)));
                for topic in &artifact.topics {
                    out.push_str(&format!(" {} |", fmt_mean(cell.mean(topic, solver))));
                }
                out.push('\n');
            }
        }
    }
    out
}

/// Render one solver's records as `;`-separated CSV: `problem;status;<topics…>`.
///
/// Not-a-number values are empty cells. Rows are sorted by problem.
pub fn render_records_csv(
    store: &EvaluationStore,
    solver: &str,
    topics: &[String],
) -> crate::Result<String> {
    let records = store
        .records(solver)
        .ok_or_else(|| SzsError::UnknownSolver(solver.to_string()))?;

    let mut out = String::from("problem;status");
    for topic in topics {
        out.push(';');
        out.push_str(topic);
    }
    out.push('\n');

    for (problem, record) in records {
        out.push_str(problem);
        out.push(';');
        out.push_str(record.status());
        for topic in topics {
            out.push(';');
            let value = record.metric(topic);
            if !value.is_nan() {
                out.push_str(&value.to_string());
            }
        }
        out.push('\n');
    }
    Ok(out)
}

/// Write one `result_<solver>.csv` per solver into `dir`.
pub fn write_records_csv(dir: &Path, store: &EvaluationStore, topics: &[String]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for solver in store.solvers() {
        let csv = render_records_csv(store, solver, topics)?;
        let path = dir.join(format!("result_{}.csv", sanitize_file_name(solver)));
        std::fs::write(&path, csv).with_context(|| format!("write {:?}", path))?;
        obs::emit_artifact_written("records_csv", &path);
        written.push(path);
    }
    Ok(written)
}

/// Raw store dump: solver → problem → record.
pub fn render_records_json(store: &EvaluationStore) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Render the contradiction verdict as Markdown.
pub fn render_contradictions_md(verdict: &ContradictionVerdict) -> String {
    let mut out = String::from("# Contradictions\n\n");
    if verdict.is_consistent() {
        out.push_str("none\n");
        return out;
    }
    out.push_str(&format!("{} contradiction(s):\n", verdict.len()));
    for c in &verdict.contradictions {
        out.push_str(&format!(
            "- `{}` / `{}`: claimed {}, expected {}\n",
            c.problem, c.solver, c.claimed, c.expected
        ));
    }
    out
}

/// Write a rendered text artifact.
pub fn write_text(path: &Path, kind: &str, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    obs::emit_artifact_written(kind, path);
    Ok(())
}

/// Replace path separators so solver names are usable as file names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}
