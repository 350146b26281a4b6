pub mod evaluator;
pub mod cache;
pub mod retry;
pub mod process;

pub use evaluator::{FitnessEvaluator, ScoredSequence};
pub use cache::{CachedEvaluator, ScoreCache};
pub use retry::RetryingEvaluator;
pub use process::ProcessEvaluator;
