//! SZS status vocabulary and the coarse outcome categories built on it.

use serde::{Deserialize, Serialize};

pub const UNSATISFIABLE: &str = "Unsatisfiable";
pub const THEOREM: &str = "Theorem";
pub const SATISFIABLE: &str = "Satisfiable";
pub const COUNTER_SATISFIABLE: &str = "CounterSatisfiable";
pub const RESOURCE_OUT: &str = "ResourceOut";
pub const INAPPROPRIATE: &str = "Inappropriate";

/// A named group of raw SZS status tags.
///
/// Membership is not exclusive: `Theorem` belongs to both [`StatusCategory::Solved`]
/// and [`StatusCategory::Unsatisfiable`]. Tags outside every group (for example
/// `Inappropriate`, or an empty status) belong to no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Solved,
    Unsatisfiable,
    Satisfiable,
    NotSolved,
}

impl StatusCategory {
    /// All categories in reporting order.
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Solved,
        StatusCategory::Unsatisfiable,
        StatusCategory::Satisfiable,
        StatusCategory::NotSolved,
    ];

    /// Raw status tags that make up this category.
    pub fn members(self) -> &'static [&'static str] {
        match self {
            StatusCategory::Solved => &[UNSATISFIABLE, THEOREM, SATISFIABLE, COUNTER_SATISFIABLE],
            StatusCategory::Unsatisfiable => &[UNSATISFIABLE, THEOREM],
            StatusCategory::Satisfiable => &[SATISFIABLE, COUNTER_SATISFIABLE],
            StatusCategory::NotSolved => &[RESOURCE_OUT],
        }
    }

    /// Whether a raw status tag is a member of this category.
    pub fn contains(self, status: &str) -> bool {
        self.members().contains(&status)
    }

    /// Snake-case name used in artifacts.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Solved => "solved",
            StatusCategory::Unsatisfiable => "unsatisfiable",
            StatusCategory::Satisfiable => "satisfiable",
            StatusCategory::NotSolved => "not_solved",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which problems a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetMode {
    /// Every attempted problem.
    All,
    /// Only problems on which every solver reported the identical raw status.
    Shared,
}

impl SubsetMode {
    pub const ALL: [SubsetMode; 2] = [SubsetMode::All, SubsetMode::Shared];

    pub fn as_str(self) -> &'static str {
        match self {
            SubsetMode::All => "all",
            SubsetMode::Shared => "shared",
        }
    }
}

impl std::fmt::Display for SubsetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
