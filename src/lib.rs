//! Multi-objective evolution of peptide sequences with NSGA-II.
//!
//! Peptides are variable-length strings over the 20 standard amino acids.
//! The engine evolves them to maximize a desirability score while minimizing
//! a risk score, both supplied by an external evaluator in one batch call
//! per generation.
//!
//! - `engines::generation`: genomes, operators, Pareto ranking and the evolution loop
//! - `engines::evaluation`: the evaluator seam plus caching, retry and process-backed scoring
//! - `config`: run configuration loaded from TOML/JSON with environment overrides
//! - `export`: JSON and FASTA output of the resulting fronts
//!
//! # Example
//!
//! ```rust,no_run
//! use peptide_nsga::config::EvolutionConfig;
//! use peptide_nsga::engines::evaluation::ProcessEvaluator;
//! use peptide_nsga::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
//! use std::time::Duration;
//!
//! let evaluator = ProcessEvaluator::new("score-peptides", Vec::new(), Duration::from_secs(60));
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), evaluator)?;
//! let fronts = engine.run(ConsoleProgressCallback)?;
//!
//! for member in &fronts[0] {
//!     println!("{} {:?}", member.label, member.scores);
//! }
//! # Ok::<(), peptide_nsga::error::PeptideError>(())
//! ```

pub mod config;
pub mod engines;
pub mod error;
pub mod export;

pub use error::{PeptideError, Result};
