use super::evaluator::{FitnessEvaluator, ScoredSequence};
use crate::error::PeptideError;
use log::warn;
use std::time::Duration;

/// Retries transient evaluator failures with exponential backoff.
///
/// Only `EvaluatorUnavailable` is retried. Protocol errors and anything else
/// surface on the first occurrence.
pub struct RetryingEvaluator<E> {
    inner: E,
    max_retries: u32,
    backoff: Duration,
}

impl<E: FitnessEvaluator> RetryingEvaluator<E> {
    pub fn new(inner: E, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: FitnessEvaluator> FitnessEvaluator for RetryingEvaluator<E> {
    fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError> {
        let mut attempt = 0;
        let mut delay = self.backoff;

        loop {
            match self.inner.evaluate(sequences) {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Evaluator call failed ({}), retry {}/{} in {:?}",
                        e, attempt, self.max_retries, delay
                    );
                    std::thread::sleep(delay);
                    delay = delay.saturating_mul(2);
                }
                result => return result,
            }
        }
    }
}
