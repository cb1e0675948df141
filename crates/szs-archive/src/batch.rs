//! Concurrent reading of several report sources.

use std::sync::Arc;

use szs_core::{ExtractedReport, ExtractorConfig, Progress, SourceDigest};
use tokio::task::JoinSet;
use tracing::info;

use crate::digest::digest_source;
use crate::error::ArchiveError;
use crate::layout::ArchiveLayout;
use crate::source::ReportSource;
use crate::Result;

/// Extracted reports of every source, in source order, plus one digest per source.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub reports: Vec<ExtractedReport>,
    pub sources: Vec<SourceDigest>,
}

/// Read and extract all `sources` concurrently, one blocking task per source.
///
/// Extraction runs inside each task, so only records (never report text)
/// are held across sources. A malformed metric in any source fails the batch.
///
/// Output order follows the order of `sources` regardless of which task
/// finishes first, so the first-wins rule for duplicate reports stays
/// deterministic.
pub async fn read_sources(
    sources: &[ReportSource],
    layout: ArchiveLayout,
    solvers: &[String],
    config: &ExtractorConfig,
    progress: Arc<Progress>,
) -> Result<SourceBatch> {
    let solvers: Arc<[String]> = solvers.into();
    let config = Arc::new(config.clone());
    let mut join_set = JoinSet::new();
    for (idx, source) in sources.iter().cloned().enumerate() {
        let solvers = Arc::clone(&solvers);
        let config = Arc::clone(&config);
        let progress = Arc::clone(&progress);
        join_set.spawn_blocking(move || {
            let digest = digest_source(&source)?;
            let reports = source.extract_reports(&layout, &solvers[..], &config, &progress)?;
            Ok::<_, ArchiveError>((idx, reports, digest))
        });
    }

    let mut ordered: Vec<Option<(Vec<ExtractedReport>, SourceDigest)>> = vec![None; sources.len()];
    while let Some(joined) = join_set.join_next().await {
        let (idx, reports, digest) =
            joined.map_err(|e| ArchiveError::Join(format!("archive read task join error: {e}")))??;
        ordered[idx] = Some((reports, digest));
    }

    let mut batch = SourceBatch::default();
    for (source, slot) in sources.iter().zip(ordered) {
        let (reports, digest) = slot.ok_or_else(|| {
            ArchiveError::Join(format!("missing read result for {}", source.path().display()))
        })?;
        batch.reports.extend(reports);
        batch.sources.push(digest);
    }

    info!(
        event = "sources.read",
        sources = batch.sources.len(),
        reports = batch.reports.len(),
    );
    Ok(batch)
}
