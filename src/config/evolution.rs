use super::traits::ConfigSection;
use crate::engines::generation::pareto::{ObjectiveConfig, OptimizationDirection};
use crate::error::PeptideError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Shortest peptide generated for the seed population.
    pub lower_length: usize,
    /// Longest peptide generated for the seed population.
    pub upper_length: usize,
    pub population_size: usize,
    pub offspring_size: usize,
    pub num_generations: usize,
    pub tournament_size: usize,
    pub mutation_probability: f64,
    /// Fraction of desirability removed from every duplicated peptide
    /// (multi-objective runs only).
    pub penalty_function_reducer: f64,
    pub seed: Option<u64>,
    /// Objectives in evaluator output order. The first one is the desirability
    /// score the duplicate penalty is applied to.
    pub objectives: Vec<ObjectiveConfig>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            lower_length: 8,
            upper_length: 15,
            population_size: 100,
            offspring_size: 20,
            num_generations: 30,
            tournament_size: 2,
            mutation_probability: 0.1,
            penalty_function_reducer: 0.5,
            seed: None,
            objectives: vec![
                ObjectiveConfig {
                    name: "desirability".to_string(),
                    direction: OptimizationDirection::Maximize,
                },
                ObjectiveConfig {
                    name: "risk".to_string(),
                    direction: OptimizationDirection::Minimize,
                },
            ],
        }
    }
}

impl EvolutionConfig {
    pub fn directions(&self) -> Vec<OptimizationDirection> {
        self.objectives.iter().map(|o| o.direction).collect()
    }

    pub fn is_multi_objective(&self) -> bool {
        self.objectives.len() > 1
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), PeptideError> {
        if self.lower_length < 1 {
            return Err(PeptideError::InvalidRange(
                "Lower length must be at least 1".to_string(),
            ));
        }
        if self.upper_length < self.lower_length {
            return Err(PeptideError::InvalidRange(format!(
                "Upper length {} is below lower length {}",
                self.upper_length, self.lower_length
            )));
        }
        if self.population_size < 1 {
            return Err(PeptideError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.offspring_size < 1 {
            return Err(PeptideError::Configuration(
                "Offspring size must be at least 1".to_string(),
            ));
        }
        if self.tournament_size < 1 {
            return Err(PeptideError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(PeptideError::Configuration(
                "Mutation probability must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.penalty_function_reducer) {
            return Err(PeptideError::Configuration(
                "Penalty function reducer must be between 0 and 1".to_string(),
            ));
        }
        if self.objectives.is_empty() {
            return Err(PeptideError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }
        Ok(())
    }
}
