use crate::error::PeptideError;
use serde::{Deserialize, Serialize};

/// Scores returned by an evaluator for one peptide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSequence {
    pub label: String,
    pub scores: Vec<f64>,
}

impl ScoredSequence {
    pub fn new(label: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            scores,
        }
    }
}

/// Batch fitness evaluation, normally backed by an external service.
///
/// Implementations return one entry per input sequence, in input order.
/// Sequences the service refuses are reported as errors, never panics.
pub trait FitnessEvaluator {
    fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError>;
}

impl<F> FitnessEvaluator for F
where
    F: FnMut(&[String]) -> Result<Vec<ScoredSequence>, PeptideError>,
{
    fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError> {
        self(sequences)
    }
}

/// Check that a batch result lines up with what was submitted.
pub fn validate_batch(
    submitted: &[String],
    returned: &[ScoredSequence],
    num_objectives: usize,
) -> Result<(), PeptideError> {
    if submitted.len() != returned.len() {
        return Err(PeptideError::EvaluatorProtocol(format!(
            "Submitted {} sequences but received {} results",
            submitted.len(),
            returned.len()
        )));
    }

    for (position, (sent, scored)) in submitted.iter().zip(returned).enumerate() {
        if sent != &scored.label {
            return Err(PeptideError::EvaluatorProtocol(format!(
                "Result {} is for '{}' but '{}' was submitted",
                position, scored.label, sent
            )));
        }
        if scored.scores.len() != num_objectives {
            return Err(PeptideError::EvaluatorProtocol(format!(
                "'{}' has {} scores, expected {}",
                scored.label,
                scored.scores.len(),
                num_objectives
            )));
        }
        if let Some(score) = scored.scores.iter().find(|s| !s.is_finite()) {
            return Err(PeptideError::EvaluatorProtocol(format!(
                "'{}' has non-finite score {}",
                scored.label, score
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aligned_batch_passes() {
        let submitted = labels(&["AK", "CK"]);
        let returned = vec![
            ScoredSequence::new("AK", vec![0.1, 0.2]),
            ScoredSequence::new("CK", vec![0.3, 0.4]),
        ];
        assert!(validate_batch(&submitted, &returned, 2).is_ok());
    }

    #[test]
    fn length_mismatch_is_protocol_error() {
        let submitted = labels(&["AK", "CK"]);
        let returned = vec![ScoredSequence::new("AK", vec![0.1])];
        assert!(matches!(
            validate_batch(&submitted, &returned, 1),
            Err(PeptideError::EvaluatorProtocol(_))
        ));
    }

    #[test]
    fn reordered_batch_is_protocol_error() {
        let submitted = labels(&["AK", "CK"]);
        let returned = vec![
            ScoredSequence::new("CK", vec![0.1]),
            ScoredSequence::new("AK", vec![0.3]),
        ];
        assert!(matches!(
            validate_batch(&submitted, &returned, 1),
            Err(PeptideError::EvaluatorProtocol(_))
        ));
    }

    #[test]
    fn wrong_arity_is_protocol_error() {
        let submitted = labels(&["AK"]);
        let returned = vec![ScoredSequence::new("AK", vec![0.1])];
        assert!(validate_batch(&submitted, &returned, 2).is_err());
    }

    #[test]
    fn non_finite_scores_are_protocol_errors() {
        let submitted = labels(&["AK", "CK"]);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let returned = vec![
                ScoredSequence::new("AK", vec![0.1, 0.2]),
                ScoredSequence::new("CK", vec![bad, 0.4]),
            ];
            assert!(matches!(
                validate_batch(&submitted, &returned, 2),
                Err(PeptideError::EvaluatorProtocol(ref m)) if m.contains("CK")
            ));
        }
    }

    #[test]
    fn closures_are_evaluators() {
        let mut evaluator = |sequences: &[String]| -> Result<Vec<ScoredSequence>, PeptideError> {
            Ok(sequences
                .iter()
                .map(|s| ScoredSequence::new(s.clone(), vec![s.len() as f64]))
                .collect())
        };
        let scored = evaluator.evaluate(&labels(&["GLF"])).unwrap();
        assert_eq!(scored[0].scores, vec![3.0]);
    }
}
