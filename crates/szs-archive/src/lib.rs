//! szs-archive: report sources for the SZS evaluation pipeline.
//!
//! Reads StarExec job output (zip archives or unpacked directories) into
//! raw reports, loads ground truth from a TPTP problem library and digests
//! sources for artifact provenance.

pub mod batch;
pub mod digest;
pub mod error;
pub mod layout;
pub mod source;
pub mod truth;

pub use batch::{read_sources, SourceBatch};
pub use digest::digest_source;
pub use error::ArchiveError;
pub use layout::ArchiveLayout;
pub use source::ReportSource;
pub use truth::load_ground_truth;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;
