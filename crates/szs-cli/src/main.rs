//! szs-eval - SZS theorem prover benchmark evaluation
//!
//! The `szs-eval` command turns StarExec job output into per-solver statistics.
//!
//! ## Commands
//!
//! - `conclude`: Aggregate reports into conclusion artifacts (JSON + Markdown)
//! - `contradictions`: Check solver claims against TPTP ground truth
//! - `records`: Dump the extracted per-report records

mod settings;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, Level};

use szs_archive::{load_ground_truth, read_sources, ReportSource};
use szs_core::reporting::ALL_DOMAINS;
use szs_core::{
    aggregate, find_contradictions, obs, render_conclusion_md, render_contradictions_md,
    render_records_json, write_conclusion_json, write_records_csv, write_text, ConclusionArtifact,
    ContradictionVerdict, EvaluationStore, PipelineSpan, Progress, SourceDigest,
};

use crate::settings::{Overrides, Settings};

/// Exit status of `contradictions` when at least one contradiction exists.
const CONTRADICTIONS_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "szs-eval")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate SZS theorem prover benchmark runs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Settings file (default: ./szs-eval.toml when present)
    #[arg(short, long, global = true, env = "SZS_EVAL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Report sources and the solvers/topics to read from them.
#[derive(Args, Debug)]
struct InputArgs {
    /// Job output archive (zip) or unpacked directory; repeatable
    #[arg(short, long = "archive", required = true)]
    archives: Vec<PathBuf>,

    /// Solver configuration to evaluate; repeatable, overrides the settings file
    #[arg(short, long = "solver")]
    solvers: Vec<String>,

    /// Metric topic to extract; repeatable, overrides the settings file
    #[arg(short, long = "topic")]
    topics: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate reports into per-category conclusion artifacts
    Conclude {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory (default: settings `out_dir`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write one conclusion per TPTP problem domain
        #[arg(long)]
        by_domain: bool,

        /// Fail when solvers were not run on the same problems
        #[arg(long)]
        strict: bool,
    },

    /// Check solver claims against the problems' ground-truth status
    Contradictions {
        #[command(flatten)]
        input: InputArgs,

        /// TPTP problem library (zip or directory)
        #[arg(short, long)]
        problems: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = VerdictFormat::Markdown)]
        format: VerdictFormat,
    },

    /// Dump extracted records
    Records {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = RecordFormat::Csv)]
        format: RecordFormat,

        /// Output directory (default: settings `out_dir`)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VerdictFormat {
    Markdown,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RecordFormat {
    /// One `result_<solver>.csv` per solver
    Csv,
    /// A single `records.json`
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    szs_core::init_tracing(cli.json_logs, level);

    let file_settings = Settings::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Conclude {
            input,
            out,
            by_domain,
            strict,
        } => {
            let settings = resolve_settings(file_settings, &input, out)?;
            cmd_conclude(&settings, &input.archives, by_domain, strict).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Contradictions {
            input,
            problems,
            format,
        } => {
            let settings = resolve_settings(file_settings, &input, None)?;
            let verdict = cmd_contradictions(&settings, &input.archives, &problems).await?;
            match format {
                VerdictFormat::Markdown => print!("{}", render_contradictions_md(&verdict)),
                VerdictFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
            }
            if verdict.is_consistent() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(CONTRADICTIONS_EXIT_CODE))
            }
        }
        Commands::Records { input, format, out } => {
            let settings = resolve_settings(file_settings, &input, out)?;
            for path in cmd_records(&settings, &input.archives, format).await? {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Apply command-line overrides and validate the result.
fn resolve_settings(settings: Settings, input: &InputArgs, out: Option<PathBuf>) -> Result<Settings> {
    let settings = settings.with_overrides(Overrides {
        solvers: input.solvers.clone(),
        topics: input.topics.clone(),
        out_dir: out,
    });
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Read and extract every archive concurrently and build the store from the records.
async fn load_store(
    settings: &Settings,
    archives: &[PathBuf],
) -> Result<(EvaluationStore, Vec<SourceDigest>)> {
    let sources: Vec<ReportSource> = archives.iter().map(|p| ReportSource::from_path(p)).collect();
    let progress = Arc::new(Progress::new(
        settings.progress.expected,
        settings.progress.interval,
    ));

    let batch = read_sources(
        &sources,
        settings.layout,
        &settings.solvers,
        &settings.extractor,
        Arc::clone(&progress),
    )
    .await
    .context("Failed to read report archives")?;
    progress.report("archives");

    let store = EvaluationStore::from_extracted(&settings.solvers, batch.reports);
    Ok((store, batch.sources))
}

fn source_label(archives: &[PathBuf]) -> String {
    archives
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Build conclusions and write them to the output directory.
async fn cmd_conclude(
    settings: &Settings,
    archives: &[PathBuf],
    by_domain: bool,
    strict: bool,
) -> Result<Vec<PathBuf>> {
    let (store, sources) = load_store(settings, archives).await?;
    let label = source_label(archives);

    if let Err(e) = store.verify_uniform() {
        if strict {
            return Err(e).context("Solvers were not run on the same problems");
        }
        obs::emit_store_inconsistent(&e);
    }

    std::fs::create_dir_all(&settings.out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", settings.out_dir))?;

    let mut written = vec![write_conclusion(settings, &label, ALL_DOMAINS, &store, &sources)?];
    if by_domain {
        for (domain, portion) in store.partition_by_domain() {
            written.push(write_conclusion(settings, &label, &domain, &portion, &sources)?);
        }
    }

    info!(artifacts = written.len(), out_dir = %settings.out_dir.display(), "Conclusions written");
    for path in &written {
        println!("{}", path.display());
    }
    Ok(written)
}

fn write_conclusion(
    settings: &Settings,
    label: &str,
    domain: &str,
    store: &EvaluationStore,
    sources: &[SourceDigest],
) -> Result<PathBuf> {
    let _span = PipelineSpan::enter(label, domain);
    let conclusion = aggregate(store, &settings.extractor.topics, &settings.solvers)
        .with_context(|| format!("Failed to aggregate domain {}", domain))?;
    let artifact = ConclusionArtifact::new(
        domain,
        settings.solvers.clone(),
        settings.extractor.topics.clone(),
        sources.to_vec(),
        conclusion,
    );

    let json_path = settings.out_dir.join(format!("{}.json", artifact.file_stem()));
    write_conclusion_json(&json_path, &artifact)?;
    let md_path = settings.out_dir.join(format!("{}.md", artifact.file_stem()));
    write_text(&md_path, "conclusion_md", &render_conclusion_md(&artifact))?;
    Ok(json_path)
}

/// Compare every solver claim with the problem library's status labels.
async fn cmd_contradictions(
    settings: &Settings,
    archives: &[PathBuf],
    problems: &Path,
) -> Result<ContradictionVerdict> {
    let (store, _) = load_store(settings, archives).await?;

    let library = ReportSource::from_path(problems);
    let truth_config = settings.truth.clone();
    let truth = tokio::task::spawn_blocking(move || load_ground_truth(&library, &truth_config))
        .await
        .context("Ground truth task failed")?
        .with_context(|| format!("Failed to load ground truth from {:?}", problems))?;

    Ok(find_contradictions(&store, &truth))
}

/// Write the extracted records; returns the written files.
async fn cmd_records(
    settings: &Settings,
    archives: &[PathBuf],
    format: RecordFormat,
) -> Result<Vec<PathBuf>> {
    let (store, _) = load_store(settings, archives).await?;

    std::fs::create_dir_all(&settings.out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", settings.out_dir))?;

    match format {
        RecordFormat::Csv => write_records_csv(&settings.out_dir, &store, &settings.extractor.topics),
        RecordFormat::Json => {
            let path = settings.out_dir.join("records.json");
            write_text(&path, "records_json", &render_records_json(&store)?)?;
            Ok(vec![path])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use szs_archive::ArchiveLayout;

    /// Lay out reports as `<root>/<solver>/<problem>/stdout`.
    fn write_reports(root: &Path, reports: &[(&str, &str, &str)]) {
        for (solver, problem, body) in reports {
            let dir = root.join(solver).join(problem);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("stdout"), body).unwrap();
        }
    }

    fn settings(out_dir: &Path) -> Settings {
        Settings {
            solvers: vec!["A".to_string(), "B".to_string()],
            layout: ArchiveLayout {
                solver_depth: 0,
                problem_depth: 1,
            },
            out_dir: out_dir.to_path_buf(),
            ..Settings::default()
        }
        .with_overrides(Overrides {
            topics: vec!["User time".to_string()],
            ..Overrides::default()
        })
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_conclude_flags() {
        let cli = Cli::try_parse_from([
            "szs-eval", "--verbose", "conclude", "-a", "a.zip", "-a", "b.zip", "-s", "A", "--by-domain",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Conclude { input, by_domain, strict, .. } => {
                assert_eq!(input.archives, vec![PathBuf::from("a.zip"), PathBuf::from("b.zip")]);
                assert_eq!(input.solvers, vec!["A"]);
                assert!(by_domain);
                assert!(!strict);
            }
            _ => panic!("expected conclude"),
        }
    }

    #[test]
    fn test_archive_is_required() {
        assert!(Cli::try_parse_from(["szs-eval", "records"]).is_err());
    }

    #[tokio::test]
    async fn test_conclude_writes_overall_and_domain_artifacts() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_reports(
            input.path(),
            &[
                ("A", "PUZ001+1.p", "# SZS status Theorem\n# User time: 1.0 s\n"),
                ("B", "PUZ001+1.p", "# SZS status Theorem\n# User time: 3.0 s\n"),
                ("A", "SET002-1.p", "# SZS status ResourceOut\n"),
                ("B", "SET002-1.p", "# SZS status ResourceOut\n"),
            ],
        );

        let written = cmd_conclude(&settings(out.path()), &[input.path().to_path_buf()], true, true)
            .await
            .unwrap();

        assert_eq!(written.len(), 3);
        for stem in ["conclusion", "PUZ", "SET"] {
            assert!(out.path().join(format!("{stem}.json")).exists(), "missing {stem}.json");
            assert!(out.path().join(format!("{stem}.md")).exists(), "missing {stem}.md");
        }

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path().join("PUZ.json")).unwrap()).unwrap();
        assert_eq!(raw["domain"], "PUZ");
        assert_eq!(raw["conclusion"]["solved"]["shared"]["User time"]["B"], 3.0);
        assert_eq!(raw["sources"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_conclude_rejects_uneven_runs() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_reports(input.path(), &[("A", "P1", "# SZS status Theorem\n")]);

        let archives = [input.path().to_path_buf()];
        assert!(cmd_conclude(&settings(out.path()), &archives, false, true).await.is_err());
        assert!(cmd_conclude(&settings(out.path()), &archives, false, false).await.is_ok());
    }

    #[tokio::test]
    async fn test_contradictions_against_problem_directory() {
        let input = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();
        write_reports(
            input.path(),
            &[
                ("A", "PUZ001+1.p", "# SZS status Theorem\n"),
                ("B", "PUZ001+1.p", "# SZS status CounterSatisfiable\n"),
            ],
        );
        std::fs::write(library.path().join("PUZ001+1.p"), "% Status   : Theorem\n").unwrap();

        let verdict = cmd_contradictions(
            &settings(input.path()),
            &[input.path().to_path_buf()],
            library.path(),
        )
        .await
        .unwrap();

        assert_eq!(verdict.len(), 1);
        assert_eq!(verdict.contradictions[0].solver, "B");
    }

    #[tokio::test]
    async fn test_records_formats() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_reports(
            input.path(),
            &[
                ("A", "P1", "# SZS status Theorem\n# User time: 2 s\n"),
                ("B", "P1", "# SZS status Satisfiable\n# User time: 4 s\n"),
            ],
        );
        let settings = settings(out.path());
        let archives = [input.path().to_path_buf()];

        let csv = cmd_records(&settings, &archives, RecordFormat::Csv).await.unwrap();
        assert_eq!(csv.len(), 2);
        assert_eq!(
            std::fs::read_to_string(out.path().join("result_A.csv")).unwrap(),
            "problem;status;User time\nP1;Theorem;2\n"
        );

        let json = cmd_records(&settings, &archives, RecordFormat::Json).await.unwrap();
        assert_eq!(json, vec![out.path().join("records.json")]);
    }
}
