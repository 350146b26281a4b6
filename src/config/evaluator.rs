use super::traits::ConfigSection;
use crate::error::PeptideError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the external scoring command and the wrappers around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Executable that reads FASTA on stdin and prints one score line per peptide.
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_ms: u64,
    /// Number of scored labels kept; 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            program: "score-peptides".to_string(),
            args: Vec::new(),
            timeout_secs: 300,
            max_retries: 3,
            backoff_ms: 500,
            cache_capacity: 10_000,
        }
    }
}

impl EvaluatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl ConfigSection for EvaluatorConfig {
    fn section_name() -> &'static str {
        "evaluator"
    }

    fn validate(&self) -> Result<(), PeptideError> {
        if self.program.trim().is_empty() {
            return Err(PeptideError::Configuration(
                "Evaluator program must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PeptideError::Configuration(
                "Evaluator timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}
