//! Aggregated per-category statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::status::{StatusCategory, SubsetMode};

/// Key of the per-solver counts in a serialised cell; no topic may use it.
pub const PROBLEMS_KEY: &str = "problems";

/// Counts and means for one (category, subset) cell.
///
/// Serialises in the artifact shape `{ "<topic>": { "<solver>": mean }, "problems": { "<solver>": count } }`.
/// Means that are not-a-number serialise as `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubsetSummary {
    /// Number of matching problems, per solver.
    pub problems: BTreeMap<String, usize>,

    /// Topic → solver → mean over the matching problems.
    #[serde(flatten)]
    pub means: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SubsetSummary {
    fn with_topics(topics: &[String]) -> Self {
        Self {
            problems: BTreeMap::new(),
            means: topics.iter().map(|t| (t.clone(), BTreeMap::new())).collect(),
        }
    }

    /// Matching problem count for `solver`; zero when the solver was not aggregated.
    pub fn count(&self, solver: &str) -> usize {
        self.problems.get(solver).copied().unwrap_or(0)
    }

    /// Mean of `topic` for `solver`; `NaN` when nothing was recorded.
    pub fn mean(&self, topic: &str, solver: &str) -> f64 {
        self.means
            .get(topic)
            .and_then(|by_solver| by_solver.get(solver))
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Structural equality that treats two `NaN` means as equal.
    pub fn equivalent(&self, other: &SubsetSummary) -> bool {
        if self.problems != other.problems || self.means.len() != other.means.len() {
            return false;
        }
        self.means.iter().all(|(topic, by_solver)| {
            let Some(theirs) = other.means.get(topic) else {
                return false;
            };
            by_solver.len() == theirs.len()
                && by_solver.iter().all(|(solver, a)| match theirs.get(solver) {
                    Some(b) => (a.is_nan() && b.is_nan()) || a == b,
                    None => false,
                })
        })
    }
}

/// Both subsets of one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorySummary {
    pub all: SubsetSummary,
    pub shared: SubsetSummary,
}

impl CategorySummary {
    pub fn subset(&self, mode: SubsetMode) -> &SubsetSummary {
        match mode {
            SubsetMode::All => &self.all,
            SubsetMode::Shared => &self.shared,
        }
    }

    pub fn subset_mut(&mut self, mode: SubsetMode) -> &mut SubsetSummary {
        match mode {
            SubsetMode::All => &mut self.all,
            SubsetMode::Shared => &mut self.shared,
        }
    }
}

/// Result of aggregating an evaluation store: category → subset → statistics.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Conclusion {
    categories: BTreeMap<StatusCategory, CategorySummary>,
}

impl Conclusion {
    /// A conclusion with every (category, subset, topic) cell present and empty.
    pub fn empty(topics: &[String]) -> Self {
        let categories = StatusCategory::ALL
            .into_iter()
            .map(|category| {
                let summary = CategorySummary {
                    all: SubsetSummary::with_topics(topics),
                    shared: SubsetSummary::with_topics(topics),
                };
                (category, summary)
            })
            .collect();
        Self { categories }
    }

    /// Statistics for one (category, subset) cell.
    pub fn subset(&self, category: StatusCategory, mode: SubsetMode) -> Option<&SubsetSummary> {
        self.categories.get(&category).map(|c| c.subset(mode))
    }

    pub(crate) fn subset_mut(&mut self, category: StatusCategory, mode: SubsetMode) -> &mut SubsetSummary {
        self.categories.entry(category).or_default().subset_mut(mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusCategory, &CategorySummary)> {
        self.categories.iter().map(|(c, s)| (*c, s))
    }
}
