/// Pareto optimization utilities for multi-objective peptide evolution
/// Implements NSGA-II style fast non-dominated sorting and crowding distance

use crate::engines::generation::individual::Individual;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Defines whether an objective should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationDirection {
    Maximize,
    Minimize,
}

/// Configuration for a single objective in multi-objective optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    pub name: String,
    pub direction: OptimizationDirection,
}

/// Check if individual A dominates individual B
///
/// A dominates B if A is at least as good as B on every objective. Equality
/// counts as domination, so two identical score vectors dominate each other;
/// `fast_non_dominated_sort` keeps such pairs in the same front.
pub fn dominates(
    a_objectives: &[f64],
    b_objectives: &[f64],
    directions: &[OptimizationDirection],
) -> bool {
    if a_objectives.len() != b_objectives.len() || a_objectives.len() != directions.len() {
        return false;
    }

    a_objectives
        .iter()
        .zip(b_objectives)
        .zip(directions)
        .all(|((&a_val, &b_val), direction)| match direction {
            OptimizationDirection::Maximize => a_val >= b_val,
            OptimizationDirection::Minimize => a_val <= b_val,
        })
}

/// Reduce the desirability (objective 0) of every individual whose label
/// occurs more than once, each occurrence independently.
pub fn apply_duplicate_penalty(individuals: &mut [Individual], reducer: f64) {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for individual in individuals.iter() {
        *occurrences.entry(individual.label.as_str()).or_insert(0) += 1;
    }

    let duplicated: Vec<bool> = individuals
        .iter()
        .map(|i| occurrences.get(i.label.as_str()).copied().unwrap_or(0) > 1)
        .collect();

    for (individual, is_duplicate) in individuals.iter_mut().zip(duplicated) {
        if !is_duplicate {
            continue;
        }
        if let Some(desirability) = individual.objectives.first_mut() {
            *desirability -= *desirability * reducer;
        }
    }
}

/// Fast non-dominated sorting (NSGA-II algorithm)
/// Returns individual indices grouped by Pareto front (0 = best, 1 = second best, etc.)
/// and sets each individual's rank to its front index.
pub fn fast_non_dominated_sort(
    individuals: &mut [Individual],
    directions: &[OptimizationDirection],
) -> Vec<Vec<usize>> {
    let n = individuals.len();

    // For each individual, track:
    // - dominated_solutions: indices of individuals it dominates
    // - domination_count: how many individuals dominate it without being dominated back
    let population: &[Individual] = individuals;
    let (dominated_solutions, mut domination_count): (Vec<Vec<usize>>, Vec<i64>) = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut dominated = Vec::new();
            let mut count = 0i64;
            for j in 0..n {
                if i == j {
                    continue;
                }

                if dominates(&population[i].objectives, &population[j].objectives, directions) {
                    // i dominates j
                    dominated.push(j);
                } else if dominates(&population[j].objectives, &population[i].objectives, directions) {
                    // j dominates i
                    count += 1;
                }
            }
            (dominated, count)
        })
        .unzip();

    // First front (non-dominated individuals)
    let first_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    for &i in &first_front {
        individuals[i].rank = Some(0);
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    if first_front.is_empty() {
        return fronts;
    }
    fronts.push(first_front);

    // Generate subsequent fronts. Tied members of a processed front decrement
    // each other below zero, which keeps them from being promoted twice.
    let mut front_index = 0;
    while front_index < fronts.len() {
        let mut next_front = Vec::new();

        for &i in &fronts[front_index] {
            for &j in &dominated_solutions[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    individuals[j].rank = Some(front_index + 1);
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            fronts.push(next_front);
        }
        front_index += 1;
    }

    fronts
}

/// Calculate crowding distance for individuals in a front
/// Crowding distance measures how close an individual is to its neighbors
/// Higher values indicate more diversity (isolated individuals)
///
/// Contributions accumulate onto the current distance, so callers reset
/// individuals before a sort cycle. Once a boundary sets a distance to
/// infinity it stays there.
pub fn calculate_crowding_distance(individuals: &mut [Individual], front_indices: &[usize]) {
    let front_size = front_indices.len();
    if front_size == 0 {
        return;
    }

    let num_objectives = individuals[front_indices[0]].objectives.len();

    // For each objective
    for obj in 0..num_objectives {
        // Sort front by this objective (stable, ties keep front order)
        let mut sorted_indices: Vec<usize> = front_indices.to_vec();
        sorted_indices.sort_by(|&a, &b| {
            individuals[a].objectives[obj]
                .partial_cmp(&individuals[b].objectives[obj])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let first = sorted_indices[0];
        let last = sorted_indices[front_size - 1];

        // Boundary points have infinite distance
        individuals[first].crowding_distance = f64::INFINITY;
        individuals[last].crowding_distance = f64::INFINITY;

        // Degenerate fronts (a single distinct value) normalize by 1
        let mut range = individuals[last].objectives[obj] - individuals[first].objectives[obj];
        if !(range > 0.0) {
            range = 1.0;
        }

        // Calculate crowding distance for interior points
        for i in 1..front_size.saturating_sub(1) {
            let idx = sorted_indices[i];
            let prev_val = individuals[sorted_indices[i - 1]].objectives[obj];
            let next_val = individuals[sorted_indices[i + 1]].objectives[obj];

            individuals[idx].crowding_distance += (next_val - prev_val) / range;
        }
    }
}

/// Compare two individuals for selection (crowded comparison operator)
/// Returns true if individual A should be preferred over individual B
pub fn crowded_comparison(a: &Individual, b: &Individual) -> bool {
    // Prefer lower rank (better Pareto front)
    if a.rank < b.rank {
        return true;
    }
    if a.rank > b.rank {
        return false;
    }

    // Same rank: prefer higher crowding distance (more diverse)
    a.crowding_distance > b.crowding_distance
}
