//! Error types for szs-archive

use thiserror::Error;

/// Errors that can occur while reading benchmark archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Archive could not be opened or read as zip
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry path too shallow for the configured layout
    #[error("Entry {path:?} has no component at depth {depth}")]
    Layout { path: String, depth: usize },

    /// Report text is not valid UTF-8
    #[error("Entry {path:?} is not valid UTF-8")]
    Encoding { path: String },

    /// A concurrent read task failed to complete
    #[error("Archive read task failed: {0}")]
    Join(String),

    /// Extraction or store error from the core pipeline
    #[error(transparent)]
    Core(#[from] szs_core::SzsError),
}
