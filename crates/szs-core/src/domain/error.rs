//! Error taxonomy for the evaluation pipeline.

/// Errors produced while extracting, storing, or aggregating benchmark results.
#[derive(Debug, thiserror::Error)]
pub enum SzsError {
    /// A metric key was found but its value is not a number.
    ///
    /// This means the report format no longer matches what the extractor
    /// expects, so it is never recovered locally.
    #[error("malformed value for metric '{topic}': {raw:?}")]
    MalformedMetric { topic: String, raw: String },

    #[error("solver not present in evaluation store: {0}")]
    UnknownSolver(String),

    #[error("inconsistent evaluation store: solver '{solver}' has no record for problem '{problem}'")]
    InconsistentStore { solver: String, problem: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, SzsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_metric_display() {
        let err = SzsError::MalformedMetric {
            topic: "User time".to_string(),
            raw: " 3.x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("User time"));
        assert!(msg.contains("3.x"));
    }

    #[test]
    fn test_inconsistent_store_display() {
        let err = SzsError::InconsistentStore {
            solver: "sos1".to_string(),
            problem: "PUZ001+1.p".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("inconsistent evaluation store"));
        assert!(msg.contains("sos1"));
        assert!(msg.contains("PUZ001+1.p"));
    }

    #[test]
    fn test_unknown_solver_display() {
        let err = SzsError::UnknownSolver("PyRes_sos9".to_string());
        assert!(err.to_string().contains("PyRes_sos9"));
    }
}
