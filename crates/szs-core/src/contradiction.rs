//! Contradiction detection against ground truth.
//!
//! A solver contradicts ground truth when one side claims a satisfiable
//! outcome and the other an unsatisfiable one. Statuses outside both
//! categories (`ResourceOut`, `Inappropriate`, empty) never contradict, and
//! neither do problems without a ground-truth label.

use serde::{Deserialize, Serialize};

use crate::domain::StatusCategory;
use crate::ground_truth::GroundTruth;
use crate::obs;
use crate::store::EvaluationStore;

/// A (problem, solver) pair whose claim conflicts with ground truth.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Contradiction {
    pub problem: String,
    pub solver: String,
    /// Status reported by the solver.
    pub claimed: String,
    /// Ground-truth status of the problem.
    pub expected: String,
}

/// Outcome of checking a store against ground truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContradictionVerdict {
    /// Contradictions found (empty when consistent), sorted by problem then solver.
    pub contradictions: Vec<Contradiction>,
}

impl ContradictionVerdict {
    /// Whether no solver contradicted ground truth.
    pub fn is_consistent(&self) -> bool {
        self.contradictions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contradictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contradictions.is_empty()
    }
}

/// Whether two statuses disagree on satisfiability. Symmetric in its arguments.
pub fn statuses_conflict(a: &str, b: &str) -> bool {
    let sat = StatusCategory::Satisfiable;
    let unsat = StatusCategory::Unsatisfiable;
    (sat.contains(a) && unsat.contains(b)) || (unsat.contains(a) && sat.contains(b))
}

/// Compare every (solver, problem) record in `store` with `truth`.
pub fn find_contradictions(store: &EvaluationStore, truth: &GroundTruth) -> ContradictionVerdict {
    let mut contradictions = Vec::new();
    for solver in store.solvers() {
        let Some(portion) = store.records(solver) else {
            continue;
        };
        for (problem, record) in portion {
            let Some(expected) = truth.get(problem) else {
                continue;
            };
            if statuses_conflict(record.status(), expected) {
                contradictions.push(Contradiction {
                    problem: problem.clone(),
                    solver: solver.to_string(),
                    claimed: record.status().to_string(),
                    expected: expected.to_string(),
                });
            }
        }
    }
    contradictions.sort();

    obs::emit_contradictions_found(contradictions.len());
    ContradictionVerdict { contradictions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutcomeRecord;

    fn store_with(entries: &[(&str, &str, &str)]) -> EvaluationStore {
        let mut solvers: Vec<&str> = entries.iter().map(|(s, _, _)| *s).collect();
        solvers.dedup();
        let mut store = EvaluationStore::new(&solvers);
        for (solver, problem, status) in entries {
            store.insert_record(solver, problem, OutcomeRecord::without_metrics(*status, &[]));
        }
        store
    }

    fn truth(entries: &[(&str, &str)]) -> GroundTruth {
        entries
            .iter()
            .map(|(p, s)| (p.to_string(), s.to_string()))
            .collect()
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let pairs = [
            ("Satisfiable", "Unsatisfiable"),
            ("CounterSatisfiable", "Theorem"),
            ("Theorem", "Satisfiable"),
        ];
        for (a, b) in pairs {
            assert!(statuses_conflict(a, b));
            assert!(statuses_conflict(b, a));
        }
        assert!(!statuses_conflict("Theorem", "Unsatisfiable"));
        assert!(!statuses_conflict("ResourceOut", "Satisfiable"));
        assert!(!statuses_conflict("Inappropriate", "Theorem"));
        assert!(!statuses_conflict("", "Theorem"));
    }

    #[test]
    fn test_detects_satisfiable_claim_on_unsatisfiable_problem() {
        let store = store_with(&[("A", "P1", "Satisfiable"), ("A", "P2", "Theorem")]);
        let verdict = find_contradictions(&store, &truth(&[("P1", "Unsatisfiable"), ("P2", "Theorem")]));

        assert!(!verdict.is_consistent());
        assert_eq!(verdict.len(), 1);
        let c = &verdict.contradictions[0];
        assert_eq!((c.problem.as_str(), c.solver.as_str()), ("P1", "A"));
        assert_eq!(c.claimed, "Satisfiable");
        assert_eq!(c.expected, "Unsatisfiable");
    }

    #[test]
    fn test_missing_truth_never_contradicts() {
        let store = store_with(&[("A", "P1", "Satisfiable")]);
        let verdict = find_contradictions(&store, &GroundTruth::new());
        assert!(verdict.is_consistent());
    }

    #[test]
    fn test_resource_out_never_contradicts() {
        let store = store_with(&[("A", "P1", "ResourceOut")]);
        let verdict = find_contradictions(&store, &truth(&[("P1", "Satisfiable")]));
        assert!(verdict.is_consistent());

        let store = store_with(&[("A", "P1", "Satisfiable")]);
        let verdict = find_contradictions(&store, &truth(&[("P1", "ResourceOut")]));
        assert!(verdict.is_consistent());
    }

    #[test]
    fn test_results_sorted_by_problem_then_solver() {
        let store = store_with(&[
            ("B", "P2", "Theorem"),
            ("B", "P1", "Theorem"),
            ("A", "P2", "Theorem"),
        ]);
        let verdict = find_contradictions(&store, &truth(&[("P1", "Satisfiable"), ("P2", "Satisfiable")]));
        let keys: Vec<_> = verdict
            .contradictions
            .iter()
            .map(|c| (c.problem.as_str(), c.solver.as_str()))
            .collect();
        assert_eq!(keys, vec![("P1", "B"), ("P2", "A"), ("P2", "B")]);
    }
}
