pub mod genome;
pub mod individual;
pub mod operators;
pub mod pareto;
pub mod replacement;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Genome, AMINO_ACIDS};
pub use individual::{FrontMember, Individual};
pub use evolution_engine::{EvolutionEngine, GenerationSummary, ProgressCallback};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage};
pub use operators::MutationKind;
pub use pareto::{ObjectiveConfig, OptimizationDirection};
