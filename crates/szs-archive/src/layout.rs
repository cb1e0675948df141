//! Path layout of StarExec job output.
//!
//! Job archives nest reports as
//! `job/user/space/domain/solver/problem/output-file`; the solver and the
//! problem are identified by their path depth.

use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveLayout {
    /// Zero-based path component holding the solver configuration name.
    pub solver_depth: usize,
    /// Zero-based path component holding the problem name.
    pub problem_depth: usize,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            solver_depth: 4,
            problem_depth: 5,
        }
    }
}

impl ArchiveLayout {
    /// Solver and problem of a `/`-separated entry path.
    pub fn locate<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str)> {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        let component = |depth: usize| {
            components
                .get(depth)
                .copied()
                .ok_or_else(|| ArchiveError::Layout {
                    path: path.to_string(),
                    depth,
                })
        };
        Ok((component(self.solver_depth)?, component(self.problem_depth)?))
    }
}
