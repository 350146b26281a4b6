use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::evaluator::{validate_batch, FitnessEvaluator};
use crate::engines::generation::{
    genome::{decode, generate_random_peptides, Genome},
    individual::{FrontMember, Individual},
    operators::{crossover, mutate, tournament_selection},
    pareto::{
        apply_duplicate_penalty, calculate_crowding_distance, fast_non_dominated_sort,
        OptimizationDirection,
    },
    replacement::next_generation,
};
use crate::error::PeptideError;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Snapshot reported after each generation's replacement step
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub population_size: usize,
    /// Fronts in the merged parent + offspring population
    pub front_count: usize,
    pub first_front_size: usize,
    /// Highest raw desirability among the survivors
    pub best_desirability: f64,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize);
    fn on_generation_complete(&mut self, summary: &GenerationSummary);
    fn on_batch_evaluated(&mut self, generation: usize, batch_size: usize);
}

impl ProgressCallback for () {
    fn on_generation_start(&mut self, _generation: usize, _total: usize) {}
    fn on_generation_complete(&mut self, _summary: &GenerationSummary) {}
    fn on_batch_evaluated(&mut self, _generation: usize, _batch_size: usize) {}
}

/// NSGA-II driver: seeds a population, then alternates variation, batch
/// evaluation, ranking and replacement for the configured generations.
pub struct EvolutionEngine<E> {
    config: EvolutionConfig,
    directions: Vec<OptimizationDirection>,
    evaluator: E,
    rng: StdRng,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    pub fn new(config: EvolutionConfig, evaluator: E) -> Result<Self, PeptideError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            directions: config.directions(),
            config,
            evaluator,
            rng,
        })
    }

    /// Replace the random source, e.g. to share one seeded generator across runs.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn into_evaluator(self) -> E {
        self.evaluator
    }

    /// Run the evolution process and return the final Pareto fronts, best first.
    ///
    /// Any evaluator failure aborts the run; no partial fronts are returned.
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<Vec<Vec<FrontMember>>, PeptideError> {
        let mut population = self.initialize_population(&mut callback)?;
        self.rank_population(&mut population);

        let mut generation = 1;
        while generation <= self.config.num_generations {
            callback.on_generation_start(generation, self.config.num_generations);

            let offspring = self.generate_offspring(&population, generation, &mut callback)?;
            population.extend(offspring);

            let fronts = self.rank_population(&mut population);
            let survivors = next_generation(&population, &fronts, self.config.population_size);

            let summary = GenerationSummary {
                generation,
                population_size: survivors.len(),
                front_count: fronts.len(),
                first_front_size: fronts.first().map_or(0, Vec::len),
                best_desirability: survivors
                    .iter()
                    .filter_map(|i| i.scores.first().copied())
                    .fold(f64::NEG_INFINITY, f64::max),
            };
            population = survivors;
            callback.on_generation_complete(&summary);

            generation += 1;
        }

        for individual in population.iter_mut() {
            individual.reset();
        }
        self.apply_penalty(&mut population);
        let fronts = fast_non_dominated_sort(&mut population, &self.directions);

        Ok(fronts
            .iter()
            .map(|front| {
                front
                    .iter()
                    .map(|&i| population[i].to_front_member())
                    .collect()
            })
            .collect())
    }

    fn initialize_population<C: ProgressCallback>(
        &mut self,
        callback: &mut C,
    ) -> Result<Vec<Individual>, PeptideError> {
        let genomes = generate_random_peptides(
            self.config.lower_length,
            self.config.upper_length,
            self.config.population_size,
            &mut self.rng,
        )?;
        self.evaluate_genomes(genomes, 0, callback)
    }

    /// Score a batch in one evaluator call and wrap the results.
    fn evaluate_genomes<C: ProgressCallback>(
        &mut self,
        genomes: Vec<Genome>,
        generation: usize,
        callback: &mut C,
    ) -> Result<Vec<Individual>, PeptideError> {
        let labels: Vec<String> = genomes.iter().map(|g| decode(g)).collect();
        debug!("Evaluating batch of {} peptides", labels.len());

        let scored = self.evaluator.evaluate(&labels)?;
        validate_batch(&labels, &scored, self.directions.len())?;
        callback.on_batch_evaluated(generation, scored.len());

        Ok(genomes
            .into_iter()
            .zip(scored)
            .map(|(genome, result)| Individual::new(genome, result.scores))
            .collect())
    }

    fn generate_offspring<C: ProgressCallback>(
        &mut self,
        population: &[Individual],
        generation: usize,
        callback: &mut C,
    ) -> Result<Vec<Individual>, PeptideError> {
        let mut children: Vec<Genome> = Vec::with_capacity(self.config.offspring_size);

        for _ in 0..self.config.offspring_size {
            let first_parent = tournament_selection(population, self.config.tournament_size, &mut self.rng)?;
            let second_parent = tournament_selection(population, self.config.tournament_size, &mut self.rng)?;

            let mut child = crossover(&first_parent.genome, &second_parent.genome, &mut self.rng);

            if self.rng.gen::<f64>() < self.config.mutation_probability {
                let mutated = mutate(child.clone(), &mut self.rng)?;
                // Deleting the only residue leaves nothing to score; keep the crossover child.
                if mutated.is_empty() {
                    debug!("Discarded mutation that emptied a child");
                } else {
                    child = mutated;
                }
            }
            children.push(child);
        }

        self.evaluate_genomes(children, generation, callback)
    }

    fn apply_penalty(&self, population: &mut [Individual]) {
        if self.config.is_multi_objective() && self.config.penalty_function_reducer > 0.0 {
            apply_duplicate_penalty(population, self.config.penalty_function_reducer);
        }
    }

    /// Reset, penalize duplicates, sort into fronts and compute crowding distances.
    fn rank_population(&self, population: &mut [Individual]) -> Vec<Vec<usize>> {
        for individual in population.iter_mut() {
            individual.reset();
        }
        self.apply_penalty(population);

        let fronts = fast_non_dominated_sort(population, &self.directions);
        for front in &fronts {
            calculate_crowding_distance(population, front);
        }
        fronts
    }
}
