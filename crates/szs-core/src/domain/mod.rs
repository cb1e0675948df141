//! Domain models for benchmark evaluation.
//!
//! Canonical definitions for the core entities:
//! - `OutcomeRecord`: status and metrics extracted from one report
//! - `StatusCategory` / `SubsetMode`: the grouping vocabulary
//! - `Conclusion`: aggregated per-category statistics

pub mod conclusion;
pub mod error;
pub mod record;
pub mod status;

pub use conclusion::{CategorySummary, Conclusion, SubsetSummary, PROBLEMS_KEY};
pub use error::{Result, SzsError};
pub use record::OutcomeRecord;
pub use status::{StatusCategory, SubsetMode};
