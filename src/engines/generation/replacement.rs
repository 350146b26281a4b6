use crate::engines::generation::individual::Individual;

/// Select individuals for the next generation.
///
/// Whole fronts are admitted best-first while they fit. The first front that
/// does not fit contributes its highest crowding-distance members until the
/// population is full, and no later front is considered.
pub fn next_generation(
    population: &[Individual],
    fronts: &[Vec<usize>],
    population_size: usize,
) -> Vec<Individual> {
    let mut next_generation: Vec<Individual> = Vec::with_capacity(population_size);

    for front in fronts {
        let remaining = population_size - next_generation.len();

        if front.len() <= remaining {
            // If the whole pareto front fits into next generation, add it.
            next_generation.extend(front.iter().map(|&i| population[i].clone()));
        } else if remaining > 0 {
            // Otherwise, add the individuals with the highest crowding distance
            // to preserve diversity.
            let mut sorted = front.clone();
            sorted.sort_by(|&a, &b| {
                population[a]
                    .crowding_distance
                    .partial_cmp(&population[b].crowding_distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            next_generation.extend(
                sorted[sorted.len() - remaining..]
                    .iter()
                    .map(|&i| population[i].clone()),
            );
            break;
        } else {
            break;
        }
    }

    next_generation
}
