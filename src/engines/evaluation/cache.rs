use super::evaluator::{FitnessEvaluator, ScoredSequence};
use crate::error::PeptideError;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Scores keyed by peptide label
pub struct ScoreCache {
    data: Mutex<HashMap<String, Vec<f64>>>,
    capacity: usize,
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<f64>> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(key).cloned()
    }

    pub fn set(&self, key: String, value: Vec<f64>) {
        if self.capacity == 0 {
            return;
        }
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        if data.len() >= self.capacity && !data.contains_key(&key) {
            // A simple eviction strategy: clear the cache when full.
            data.clear();
        }
        data.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forwards only peptides that have not been scored before.
pub struct CachedEvaluator<E> {
    inner: E,
    cache: ScoreCache,
}

impl<E: FitnessEvaluator> CachedEvaluator<E> {
    pub fn new(inner: E, capacity: usize) -> Self {
        Self {
            inner,
            cache: ScoreCache::new(capacity),
        }
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: FitnessEvaluator> FitnessEvaluator for CachedEvaluator<E> {
    fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError> {
        let mut cached: HashMap<&str, Vec<f64>> = HashMap::new();
        let mut pending: Vec<String> = Vec::new();
        let mut queued: HashSet<&str> = HashSet::new();

        for sequence in sequences {
            if cached.contains_key(sequence.as_str()) || queued.contains(sequence.as_str()) {
                continue;
            }
            match self.cache.get(sequence) {
                Some(scores) => {
                    cached.insert(sequence.as_str(), scores);
                }
                None => {
                    queued.insert(sequence.as_str());
                    pending.push(sequence.clone());
                }
            }
        }

        debug!(
            "Score cache: {} hits, {} forwarded of {} sequences",
            cached.len(),
            pending.len(),
            sequences.len()
        );

        let mut fetched: HashMap<String, Vec<f64>> = HashMap::new();
        if !pending.is_empty() {
            let scored = self.inner.evaluate(&pending)?;
            if scored.len() != pending.len() {
                return Err(PeptideError::EvaluatorProtocol(format!(
                    "Submitted {} sequences but received {} results",
                    pending.len(),
                    scored.len()
                )));
            }
            for (sent, result) in pending.iter().zip(scored) {
                if sent != &result.label {
                    return Err(PeptideError::EvaluatorProtocol(format!(
                        "Received scores for '{}' where '{}' was submitted",
                        result.label, sent
                    )));
                }
                self.cache.set(result.label.clone(), result.scores.clone());
                fetched.insert(result.label, result.scores);
            }
        }

        sequences
            .iter()
            .map(|sequence| {
                cached
                    .get(sequence.as_str())
                    .or_else(|| fetched.get(sequence))
                    .map(|scores| ScoredSequence::new(sequence.clone(), scores.clone()))
                    .ok_or_else(|| {
                        PeptideError::EvaluatorProtocol(format!("No scores for '{}'", sequence))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingEvaluator {
        submitted: Vec<Vec<String>>,
    }

    impl FitnessEvaluator for CountingEvaluator {
        fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError> {
            self.submitted.push(sequences.to_vec());
            Ok(sequences
                .iter()
                .map(|s| ScoredSequence::new(s.clone(), vec![s.len() as f64]))
                .collect())
        }
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn repeated_labels_are_scored_once() {
        let mut evaluator = CachedEvaluator::new(CountingEvaluator { submitted: Vec::new() }, 100);

        let first = evaluator.evaluate(&labels(&["AK", "GLF", "AK"])).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[2], ScoredSequence::new("AK", vec![2.0]));

        let second = evaluator.evaluate(&labels(&["GLF", "WWWW"])).unwrap();
        assert_eq!(second[0].scores, vec![3.0]);
        assert_eq!(second[1].scores, vec![4.0]);

        let inner = evaluator.into_inner();
        assert_eq!(inner.submitted, vec![labels(&["AK", "GLF"]), labels(&["WWWW"])]);
    }

    #[test]
    fn fully_cached_batch_skips_inner_call() {
        let mut evaluator = CachedEvaluator::new(CountingEvaluator { submitted: Vec::new() }, 100);
        evaluator.evaluate(&labels(&["AK"])).unwrap();
        evaluator.evaluate(&labels(&["AK", "AK"])).unwrap();

        assert_eq!(evaluator.cache().len(), 1);
        assert_eq!(evaluator.into_inner().submitted.len(), 1);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut evaluator = CachedEvaluator::new(CountingEvaluator { submitted: Vec::new() }, 0);
        evaluator.evaluate(&labels(&["AK"])).unwrap();
        evaluator.evaluate(&labels(&["AK"])).unwrap();

        assert!(evaluator.cache().is_empty());
        assert_eq!(evaluator.into_inner().submitted.len(), 2);
    }

    #[test]
    fn full_cache_is_cleared() {
        let cache = ScoreCache::new(2);
        cache.set("A".to_string(), vec![1.0]);
        cache.set("C".to_string(), vec![2.0]);
        cache.set("D".to_string(), vec![3.0]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("D"), Some(vec![3.0]));
        assert_eq!(cache.get("A"), None);
    }

    #[test]
    fn misaligned_inner_result_is_rejected() {
        let mut evaluator = CachedEvaluator::new(
            |sequences: &[String]| -> Result<Vec<ScoredSequence>, PeptideError> {
                Ok(sequences
                    .iter()
                    .rev()
                    .map(|s| ScoredSequence::new(s.clone(), vec![1.0]))
                    .collect())
            },
            10,
        );
        assert!(matches!(
            evaluator.evaluate(&labels(&["AK", "CK"])),
            Err(PeptideError::EvaluatorProtocol(_))
        ));
    }
}
