use crate::engines::generation::genome::{decode, Genome};
use serde::{Deserialize, Serialize};

/// A peptide with its evaluated scores and NSGA-II bookkeeping
#[derive(Debug, Clone)]
pub struct Individual {
    pub genome: Genome,
    pub label: String,
    /// Raw evaluator scores, one per objective.
    pub scores: Vec<f64>,
    /// Scores used for dominance and crowding (raw scores after the duplicate penalty).
    pub objectives: Vec<f64>,
    pub rank: Option<usize>,       // Pareto rank (0 = best front), None until sorted
    pub crowding_distance: f64,    // Diversity measure
}

impl Individual {
    pub fn new(genome: Genome, scores: Vec<f64>) -> Self {
        let label = decode(&genome);
        Self {
            genome,
            label,
            objectives: scores.clone(),
            scores,
            rank: None,
            crowding_distance: 0.0,
        }
    }

    /// Clear rank and distance and drop any penalty from the previous sort.
    pub fn reset(&mut self) {
        self.rank = None;
        self.crowding_distance = 0.0;
        self.objectives.clone_from(&self.scores);
    }

    pub fn to_front_member(&self) -> FrontMember {
        FrontMember {
            genome: self.genome.clone(),
            label: self.label.clone(),
            scores: self.scores.clone(),
            objectives: self.objectives.clone(),
        }
    }
}

/// One solution of a returned Pareto front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMember {
    pub genome: Genome,
    pub label: String,
    pub scores: Vec<f64>,
    pub objectives: Vec<f64>,
}
