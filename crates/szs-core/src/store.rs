//! Evaluation store: solver → problem → [`OutcomeRecord`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{OutcomeRecord, Result, SzsError};
use crate::extract::{extract_record, ExtractorConfig};
use crate::obs;

/// Domain name used for problems whose identifier has no alphabetic prefix.
pub const MISC_DOMAIN: &str = "misc";

/// One raw report as handed over by archive traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    pub solver: String,
    pub problem: String,
    pub text: String,
}

impl RawReport {
    pub fn new(solver: impl Into<String>, problem: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            solver: solver.into(),
            problem: problem.into(),
            text: text.into(),
        }
    }

    /// Extract the record and drop the report text.
    pub fn extract(self, config: &ExtractorConfig) -> Result<ExtractedReport> {
        let record = extract_record(&self.text, config)?;
        obs::emit_report_extracted(&self.solver, &self.problem, record.status());
        Ok(ExtractedReport {
            solver: self.solver,
            problem: self.problem,
            record,
        })
    }
}

/// A report reduced to its [`OutcomeRecord`].
#[derive(Debug, Clone)]
pub struct ExtractedReport {
    pub solver: String,
    pub problem: String,
    pub record: OutcomeRecord,
}

/// Outcome of offering one report to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The solver is not one of the configured solvers.
    IgnoredSolver,
    /// A record for this (solver, problem) already exists; the first one is kept.
    Duplicate,
}

/// Two-level mapping from solver to problem to extracted record.
///
/// # Invariants
///
/// Every configured solver has a portion, even when empty. Before any
/// filtering, every portion should cover the same problem identifiers;
/// [`EvaluationStore::verify_uniform`] checks this. The store is append-only
/// and consumers treat it as read-only.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EvaluationStore {
    solvers: BTreeMap<String, BTreeMap<String, OutcomeRecord>>,
}

impl EvaluationStore {
    /// An empty store with a portion for each configured solver.
    pub fn new<S: AsRef<str>>(solvers: &[S]) -> Self {
        Self {
            solvers: solvers
                .iter()
                .map(|s| (s.as_ref().to_string(), BTreeMap::new()))
                .collect(),
        }
    }

    /// Build a store from already-extracted reports, in the given order.
    pub fn from_extracted<S, I>(solvers: &[S], reports: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = ExtractedReport>,
    {
        let mut store = Self::new(solvers);
        for report in reports {
            store.insert_record(&report.solver, &report.problem, report.record);
        }
        obs::emit_store_built(store.solvers.len(), store.problem_ids().len(), store.len());
        store
    }

    /// Store an already-extracted record.
    pub fn insert_record(&mut self, solver: &str, problem: &str, record: OutcomeRecord) -> InsertOutcome {
        let Some(portion) = self.solvers.get_mut(solver) else {
            return InsertOutcome::IgnoredSolver;
        };
        if portion.contains_key(problem) {
            obs::emit_duplicate_report(solver, problem);
            return InsertOutcome::Duplicate;
        }
        portion.insert(problem.to_string(), record);
        InsertOutcome::Inserted
    }

    pub fn solvers(&self) -> impl Iterator<Item = &str> {
        self.solvers.keys().map(String::as_str)
    }

    pub fn contains_solver(&self, solver: &str) -> bool {
        self.solvers.contains_key(solver)
    }

    /// The portion of one solver, if configured.
    pub fn records(&self, solver: &str) -> Option<&BTreeMap<String, OutcomeRecord>> {
        self.solvers.get(solver)
    }

    pub fn record(&self, solver: &str, problem: &str) -> Option<&OutcomeRecord> {
        self.solvers.get(solver)?.get(problem)
    }

    /// Union of problem identifiers across all solvers.
    pub fn problem_ids(&self) -> BTreeSet<&str> {
        self.solvers
            .values()
            .flat_map(|portion| portion.keys().map(String::as_str))
            .collect()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.solvers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every solver covers the same problems.
    ///
    /// Reports the first (solver, problem) pair, in sorted order, where a
    /// problem known to some solver is missing for this one.
    pub fn verify_uniform(&self) -> Result<()> {
        let universe = self.problem_ids();
        for (solver, portion) in &self.solvers {
            if let Some(problem) = universe.iter().find(|p| !portion.contains_key(**p)) {
                return Err(SzsError::InconsistentStore {
                    solver: solver.clone(),
                    problem: problem.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Copy restricted to `problems`; every solver keeps a (possibly empty) portion.
    pub fn retain_problems(&self, problems: &BTreeSet<&str>) -> Self {
        let solvers = self
            .solvers
            .iter()
            .map(|(solver, portion)| {
                let kept = portion
                    .iter()
                    .filter(|(problem, _)| problems.contains(problem.as_str()))
                    .map(|(problem, record)| (problem.clone(), record.clone()))
                    .collect();
                (solver.clone(), kept)
            })
            .collect();
        Self { solvers }
    }

    /// Split into one store per TPTP problem domain (see [`problem_domain`]).
    pub fn partition_by_domain(&self) -> BTreeMap<String, EvaluationStore> {
        let mut domains: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for problem in self.problem_ids() {
            domains
                .entry(problem_domain(problem).to_string())
                .or_default()
                .insert(problem);
        }
        domains
            .into_iter()
            .map(|(domain, problems)| (domain, self.retain_problems(&problems)))
            .collect()
    }
}

/// TPTP domain of a problem identifier: its leading ASCII letters (`PUZ001+1.p` → `PUZ`).
pub fn problem_domain(problem: &str) -> &str {
    let end = problem
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(problem.len());
    if end == 0 {
        MISC_DOMAIN
    } else {
        &problem[..end]
    }
}
