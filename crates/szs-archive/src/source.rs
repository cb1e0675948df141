//! Enumeration of raw reports from a zip archive or an unpacked directory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use szs_core::{ExtractedReport, ExtractorConfig, Progress, RawReport};
use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::layout::ArchiveLayout;
use crate::Result;

/// Where raw report files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// A zip archive as downloaded from StarExec.
    Zip(PathBuf),
    /// The same tree, already unpacked.
    Dir(PathBuf),
}

impl ReportSource {
    /// Directories are walked; anything else is opened as a zip archive.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ReportSource::Dir(path)
        } else {
            ReportSource::Zip(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReportSource::Zip(p) | ReportSource::Dir(p) => p,
        }
    }

    /// Call `visit` with the `/`-separated relative path and contents of every file,
    /// in archive order (zip) or file-name order (directory).
    pub(crate) fn visit_files<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, &mut dyn Read) -> Result<()>,
    {
        match self {
            ReportSource::Zip(path) => {
                let file = File::open(path)?;
                let mut archive = ZipArchive::new(BufReader::new(file))?;
                for index in 0..archive.len() {
                    let mut entry = archive.by_index(index)?;
                    if entry.is_dir() {
                        continue;
                    }
                    let name = entry.name().to_string();
                    visit(&name, &mut entry)?;
                }
            }
            ReportSource::Dir(root) => {
                for entry in WalkDir::new(root).sort_by_file_name() {
                    let entry = entry?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    let mut file = File::open(entry.path())?;
                    visit(&name, &mut file)?;
                }
            }
        }
        Ok(())
    }

    /// Read and extract every report of a configured solver.
    ///
    /// Files of other solvers are skipped without being read. Report text is
    /// dropped as soon as its record is extracted; a malformed metric stops
    /// the read. Each extracted report ticks `progress`.
    pub fn extract_reports<S: AsRef<str>>(
        &self,
        layout: &ArchiveLayout,
        solvers: &[S],
        config: &ExtractorConfig,
        progress: &Progress,
    ) -> Result<Vec<ExtractedReport>> {
        let label = self.path().display().to_string();
        let mut reports = Vec::new();
        let mut skipped = 0usize;

        self.visit_files(|name, reader| {
            let (solver, problem) = layout.locate(name)?;
            if !solvers.iter().any(|s| s.as_ref() == solver) {
                skipped += 1;
                return Ok(());
            }
            let text = read_text(name, reader)?;
            reports.push(RawReport::new(solver, problem, text).extract(config)?);
            progress.inc(&label);
            Ok(())
        })?;

        debug!(source = %label, reports = reports.len(), skipped, "source read");
        Ok(reports)
    }
}

/// Read an entry as UTF-8 text.
pub(crate) fn read_text(name: &str, reader: &mut dyn Read) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| ArchiveError::Encoding {
        path: name.to_string(),
    })
}
