//! Reading StarExec-shaped zip archives end to end.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use szs_archive::{
    digest_source, load_ground_truth, read_sources, ArchiveError, ArchiveLayout, ReportSource,
};
use szs_core::{
    aggregate, find_contradictions, EvaluationStore, ExtractorConfig, GroundTruthConfig, Progress,
    RawReport, StatusCategory, SubsetMode, SzsError,
};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn write_zip(path: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let file = std::fs::File::create(path).expect("create zip");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish zip");
    path.to_path_buf()
}

fn job_entry(solver: &str, problem: &str) -> String {
    format!("job1/user/space/PUZ/{solver}/{problem}/stdout.txt")
}

fn report(status: &str, time: &str) -> String {
    format!("0.00/0.01\t# SZS status {status}\n0.00/0.01\t# User time : {time}\n")
}

fn solvers() -> Vec<String> {
    vec!["PyRes_sos0".to_string(), "PyRes_sos1".to_string()]
}

fn config() -> ExtractorConfig {
    ExtractorConfig::with_topics(vec!["User time".to_string()])
}

#[tokio::test]
async fn reads_configured_solvers_from_zip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let entries = [
        (job_entry("PyRes_sos0", "PUZ001+1.p"), report("Theorem", "0.5 s")),
        (job_entry("PyRes_sos1", "PUZ001+1.p"), report("Theorem", "0.25 s")),
        (job_entry("Other", "PUZ001+1.p"), report("Satisfiable", "9 s")),
    ];
    let borrowed: Vec<(&str, &str)> = entries.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
    let zip = write_zip(&dir.path().join("job.zip"), &borrowed);

    let progress = Arc::new(Progress::new(2, 1));
    let batch = read_sources(
        &[ReportSource::Zip(zip)],
        ArchiveLayout::default(),
        &solvers(),
        &config(),
        Arc::clone(&progress),
    )
    .await
    .expect("read sources");

    assert_eq!(batch.reports.len(), 2);
    assert_eq!(batch.sources.len(), 1);
    assert_eq!(progress.processed(), 2);

    assert_eq!(batch.reports[0].record.metric("User time"), 0.5);

    let store = EvaluationStore::from_extracted(&solvers(), batch.reports);
    let conclusion = aggregate(&store, &config().topics, &solvers()).expect("aggregate");
    let shared = conclusion
        .subset(StatusCategory::Solved, SubsetMode::Shared)
        .expect("cell");
    assert_eq!(shared.count("PyRes_sos0"), 1);
    assert_eq!(shared.mean("User time", "PyRes_sos1"), 0.25);
}

#[tokio::test]
async fn keeps_source_order_for_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first_entry = job_entry("PyRes_sos0", "PUZ001+1.p");
    let first_report = report("Theorem", "1 s");
    let second_report = report("Satisfiable", "2 s");
    let first = write_zip(
        &dir.path().join("a.zip"),
        &[(first_entry.as_str(), first_report.as_str())],
    );
    let second = write_zip(
        &dir.path().join("b.zip"),
        &[(first_entry.as_str(), second_report.as_str())],
    );

    let batch = read_sources(
        &[ReportSource::Zip(first.clone()), ReportSource::Zip(second)],
        ArchiveLayout::default(),
        &solvers(),
        &config(),
        Arc::new(Progress::new(0, 0)),
    )
    .await
    .expect("read sources");

    assert_eq!(batch.sources[0].path, first.display().to_string());
    let store = EvaluationStore::from_extracted(&solvers(), batch.reports);
    let record = store.record("PyRes_sos0", "PUZ001+1.p").expect("record");
    assert_eq!(record.status(), "Theorem");
}

#[tokio::test]
async fn shallow_entry_is_a_layout_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let zip = write_zip(&dir.path().join("bad.zip"), &[("job1/stdout.txt", "# SZS status Theorem\n")]);

    let result = read_sources(
        &[ReportSource::Zip(zip)],
        ArchiveLayout::default(),
        &solvers(),
        &config(),
        Arc::new(Progress::new(0, 0)),
    )
    .await;
    assert!(matches!(result, Err(ArchiveError::Layout { .. })));
}

#[tokio::test]
async fn malformed_metric_in_any_archive_fails_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good_entry = job_entry("PyRes_sos0", "PUZ001+1.p");
    let good_report = report("Theorem", "1 s");
    let bad_entry = job_entry("PyRes_sos1", "PUZ001+1.p");
    let bad_report = report("Theorem", "n/a");
    let good = write_zip(&dir.path().join("a.zip"), &[(good_entry.as_str(), good_report.as_str())]);
    let bad = write_zip(&dir.path().join("b.zip"), &[(bad_entry.as_str(), bad_report.as_str())]);

    let result = read_sources(
        &[ReportSource::Zip(good), ReportSource::Zip(bad)],
        ArchiveLayout::default(),
        &solvers(),
        &config(),
        Arc::new(Progress::new(0, 0)),
    )
    .await;
    match result {
        Err(ArchiveError::Core(SzsError::MalformedMetric { topic, .. })) => assert_eq!(topic, "User time"),
        other => panic!("expected malformed metric, got {other:?}"),
    }
}

#[test]
fn missing_archive_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = ReportSource::Zip(dir.path().join("absent.zip"));
    assert!(matches!(digest_source(&source), Err(ArchiveError::Io(_))));
}

#[test]
fn ground_truth_from_problem_library_zip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let zip = write_zip(
        &dir.path().join("TPTP.zip"),
        &[
            ("TPTP-v8/Problems/PUZ/PUZ001+1.p", "% File     : PUZ001+1\n% Status   : Theorem\n"),
            ("TPTP-v8/Problems/PUZ/PUZ002-1.p", "% Status   : Satisfiable\n"),
            ("TPTP-v8/Axioms/PUZ001+0.ax", "% no label\n"),
        ],
    );
    let truth = load_ground_truth(&ReportSource::Zip(zip), &GroundTruthConfig::default()).expect("truth");
    assert_eq!(truth.len(), 2);
    assert_eq!(truth.get("PUZ001+1.p"), Some("Theorem"));

    let claim = RawReport::new("A", "PUZ002-1.p", "# SZS status Unsatisfiable\n")
        .extract(&ExtractorConfig::with_topics(vec![]))
        .expect("extract");
    let store = EvaluationStore::from_extracted(&["A"], [claim]);
    let verdict = find_contradictions(&store, &truth);
    assert_eq!(verdict.len(), 1);
    assert_eq!(verdict.contradictions[0].expected, "Satisfiable");
}

#[test]
fn zip_digest_is_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let zip = write_zip(&dir.path().join("job.zip"), &[("a/b", "x")]);
    let first = digest_source(&ReportSource::Zip(zip.clone())).expect("digest");
    let again = digest_source(&ReportSource::Zip(zip)).expect("digest");
    assert_eq!(first, again);
    assert_eq!(first.sha256.len(), 64);
}
