pub mod traits;
pub mod evolution;
pub mod evaluator;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use evaluator::EvaluatorConfig;
pub use traits::ConfigSection;
