use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeptideError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Evaluator protocol error: {0}")]
    EvaluatorProtocol(String),

    #[error("Evaluator unavailable: {0}")]
    EvaluatorUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PeptideError {
    /// Whether a retry of the same evaluator call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, PeptideError::EvaluatorUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, PeptideError>;
