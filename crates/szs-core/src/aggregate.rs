//! Category aggregation over an [`EvaluationStore`].
//!
//! For every [`StatusCategory`] and solver, counts the problems whose status
//! falls in the category and averages each metric over them. This is done
//! once over all problems ([`SubsetMode::All`]) and once over the problems
//! on which every solver reported the identical raw status
//! ([`SubsetMode::Shared`]).

use std::collections::BTreeSet;

use crate::domain::{Conclusion, Result, StatusCategory, SubsetMode, SzsError, PROBLEMS_KEY};
use crate::obs;
use crate::store::EvaluationStore;

/// Mean that ignores `NaN` entries; `NaN` when no finite entry remains.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Aggregate `store` into a [`Conclusion`] for `solvers` and `topics`.
///
/// Every configured solver must have a portion in the store. The store is
/// only read; shared-subset filtering works on a separate copy.
pub fn aggregate<S: AsRef<str>>(
    store: &EvaluationStore,
    topics: &[String],
    solvers: &[S],
) -> Result<Conclusion> {
    if solvers.is_empty() {
        return Err(SzsError::InvalidConfig("no solvers configured".to_string()));
    }
    if topics.iter().any(|t| t == PROBLEMS_KEY) {
        return Err(SzsError::InvalidConfig(format!(
            "topic name '{PROBLEMS_KEY}' is reserved for problem counts"
        )));
    }
    if let Some(missing) = solvers.iter().find(|s| !store.contains_solver(s.as_ref())) {
        return Err(SzsError::UnknownSolver(missing.as_ref().to_string()));
    }

    let mut conclusion = Conclusion::empty(topics);
    conclude_subset(&mut conclusion, store, SubsetMode::All, topics, solvers);

    let shared = shared_subset(store, solvers);
    conclude_subset(&mut conclusion, &shared, SubsetMode::Shared, topics, solvers);

    obs::emit_conclusion_built(solvers.len(), store.problem_ids().len(), shared.problem_ids().len());
    Ok(conclusion)
}

/// Copy of `store` restricted to problems where every solver in `solvers`
/// has a record and all their raw statuses are byte-for-byte identical.
///
/// A problem missing from any solver's portion is not shared.
pub fn shared_subset<S: AsRef<str>>(store: &EvaluationStore, solvers: &[S]) -> EvaluationStore {
    let mut incomplete = 0usize;
    let mut shared = BTreeSet::new();

    for problem in store.problem_ids() {
        let mut statuses = solvers
            .iter()
            .map(|solver| store.record(solver.as_ref(), problem).map(|r| r.status()));

        let Some(Some(first)) = statuses.next() else {
            incomplete += 1;
            continue;
        };
        let mut agreed = true;
        for status in statuses {
            match status {
                Some(status) if status == first => {}
                Some(_) => agreed = false,
                None => {
                    incomplete += 1;
                    agreed = false;
                    break;
                }
            }
        }
        if agreed {
            shared.insert(problem);
        }
    }

    if incomplete > 0 {
        obs::emit_shared_incomplete(incomplete);
    }
    store.retain_problems(&shared)
}

fn conclude_subset<S: AsRef<str>>(
    conclusion: &mut Conclusion,
    store: &EvaluationStore,
    mode: SubsetMode,
    topics: &[String],
    solvers: &[S],
) {
    for category in StatusCategory::ALL {
        for solver in solvers {
            conclude_single_solver(conclusion, store, category, mode, topics, solver.as_ref());
        }
    }
}

/// Count the problems of `solver` in `category` and store the per-topic means.
fn conclude_single_solver(
    conclusion: &mut Conclusion,
    store: &EvaluationStore,
    category: StatusCategory,
    mode: SubsetMode,
    topics: &[String],
    solver: &str,
) {
    let matching: Vec<_> = store
        .records(solver)
        .into_iter()
        .flat_map(|portion| portion.values())
        .filter(|record| category.contains(record.status()))
        .collect();

    let cell = conclusion.subset_mut(category, mode);
    cell.problems.insert(solver.to_string(), matching.len());
    for topic in topics {
        let values: Vec<f64> = matching.iter().map(|r| r.metric(topic)).collect();
        cell.means
            .entry(topic.clone())
            .or_default()
            .insert(solver.to_string(), nan_mean(&values));
    }
}
