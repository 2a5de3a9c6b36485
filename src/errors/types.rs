use thiserror::Error;

#[derive(Debug, Error)]
pub enum VultesterError {
    #[error("Rule base error: {0}")]
    RuleBase(String),

    #[error("Contradictory facts: '{first}' and '{second}' are mutually exclusive")]
    ContradictoryFacts { first: String, second: String },

    #[error("Invalid method '{0}'. Use: forward, backward, or mixed")]
    UnknownMethod(String),

    #[error("Inference invariant violated: {0}")]
    InvariantViolation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
