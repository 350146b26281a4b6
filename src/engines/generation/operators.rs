use crate::engines::generation::{
    genome::{random_amino_acid, Genome},
    individual::Individual,
    pareto::crowded_comparison,
};
use crate::error::PeptideError;
use log::debug;
use rand::Rng;

/// Point mutations available to an offspring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Insert,
    Delete,
    Swap,
    Substitute,
}

impl MutationKind {
    pub const ALL: [MutationKind; 4] = [
        MutationKind::Insert,
        MutationKind::Delete,
        MutationKind::Swap,
        MutationKind::Substitute,
    ];

    /// Shortest genome this mutation can be applied to
    pub fn min_length(self) -> usize {
        match self {
            MutationKind::Insert => 0,
            MutationKind::Delete | MutationKind::Substitute => 1,
            MutationKind::Swap => 2,
        }
    }

    pub fn applies_to(self, length: usize) -> bool {
        length >= self.min_length()
    }

    pub fn apply<R: Rng>(self, genome: Genome, rng: &mut R) -> Result<Genome, PeptideError> {
        match self {
            MutationKind::Insert => Ok(insert_amino_acid(genome, rng)),
            MutationKind::Delete => delete_amino_acid(genome, rng),
            MutationKind::Swap => swap_amino_acids(genome, rng),
            MutationKind::Substitute => substitute_amino_acid(genome, rng),
        }
    }
}

/// Insert a random amino acid at a position in `[0, len]`
pub fn insert_amino_acid<R: Rng>(mut genome: Genome, rng: &mut R) -> Genome {
    let index = rng.gen_range(0..=genome.len());
    genome.insert(index, random_amino_acid(rng));
    genome
}

/// Remove the amino acid at a random position
pub fn delete_amino_acid<R: Rng>(mut genome: Genome, rng: &mut R) -> Result<Genome, PeptideError> {
    if genome.is_empty() {
        return Err(PeptideError::InvalidState(
            "Cannot delete from an empty peptide".to_string(),
        ));
    }
    let index = rng.gen_range(0..genome.len());
    genome.remove(index);
    Ok(genome)
}

/// Exchange the amino acids at two distinct random positions
pub fn swap_amino_acids<R: Rng>(mut genome: Genome, rng: &mut R) -> Result<Genome, PeptideError> {
    if genome.len() < 2 {
        return Err(PeptideError::InvalidState(format!(
            "Cannot swap within a peptide of length {}",
            genome.len()
        )));
    }
    let first = rng.gen_range(0..genome.len());
    // Draw from the remaining positions so the two indices differ
    let mut second = rng.gen_range(0..genome.len() - 1);
    if second >= first {
        second += 1;
    }
    genome.swap(first, second);
    Ok(genome)
}

/// Replace the amino acid at a random position; the new one may equal the old one
pub fn substitute_amino_acid<R: Rng>(
    mut genome: Genome,
    rng: &mut R,
) -> Result<Genome, PeptideError> {
    if genome.is_empty() {
        return Err(PeptideError::InvalidState(
            "Cannot substitute in an empty peptide".to_string(),
        ));
    }
    let index = rng.gen_range(0..genome.len());
    genome[index] = random_amino_acid(rng);
    Ok(genome)
}

/// Apply one uniformly chosen mutation. A kind that cannot act on the
/// current length is redrawn among the kinds that can.
pub fn mutate<R: Rng>(genome: Genome, rng: &mut R) -> Result<Genome, PeptideError> {
    let mut kind = MutationKind::ALL[rng.gen_range(0..MutationKind::ALL.len())];

    if !kind.applies_to(genome.len()) {
        let applicable: Vec<MutationKind> = MutationKind::ALL
            .iter()
            .copied()
            .filter(|k| k.applies_to(genome.len()))
            .collect();
        kind = applicable[rng.gen_range(0..applicable.len())];
    }

    debug!("Mutation type: {:?} (length {})", kind, genome.len());
    kind.apply(genome, rng)
}

/// Single-point variable-length crossover
///
/// The recombination index is drawn from parent1's length only; when parent2
/// is shorter than the index its tail is empty. This is what lets peptide
/// lengths drift between generations.
pub fn crossover<R: Rng>(parent1: &[char], parent2: &[char], rng: &mut R) -> Genome {
    let point = if parent1.is_empty() {
        0
    } else {
        rng.gen_range(0..parent1.len())
    };

    let mut child = Vec::with_capacity(point + parent2.len().saturating_sub(point));
    child.extend_from_slice(&parent1[..point]);
    if point < parent2.len() {
        child.extend_from_slice(&parent2[point..]);
    }
    child
}

/// Pareto tournament selection: lower rank wins, then higher crowding distance.
/// Full ties keep the current winner.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Result<&'a Individual, PeptideError> {
    if population.is_empty() {
        return Err(PeptideError::InvalidState(
            "Cannot select from an empty population".to_string(),
        ));
    }

    let mut winner = &population[rng.gen_range(0..population.len())];

    for _ in 1..tournament_size {
        let opponent = &population[rng.gen_range(0..population.len())];
        if crowded_comparison(opponent, winner) {
            winner = opponent;
        }
    }

    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::genome::{encode, is_amino_acid};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn peptide(label: &str) -> Genome {
        encode(label).unwrap()
    }

    #[test]
    fn insert_grows_by_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mutated = insert_amino_acid(peptide("GLFD"), &mut rng);
            assert_eq!(mutated.len(), 5);
            assert!(mutated.iter().all(|&c| is_amino_acid(c)));
        }
        assert_eq!(insert_amino_acid(Vec::new(), &mut rng).len(), 1);
    }

    #[test]
    fn delete_shrinks_by_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let mutated = delete_amino_acid(peptide("GLFD"), &mut rng).unwrap();
        assert_eq!(mutated.len(), 3);

        assert!(matches!(
            delete_amino_acid(Vec::new(), &mut rng),
            Err(PeptideError::InvalidState(_))
        ));
    }

    #[test]
    fn swap_keeps_composition() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let mutated = swap_amino_acids(peptide("ACDE"), &mut rng).unwrap();
            let mut sorted = mutated.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, peptide("ACDE"));
            // Positions are distinct, so all-distinct input always changes
            assert_ne!(mutated, peptide("ACDE"));
        }

        assert!(matches!(
            swap_amino_acids(peptide("A"), &mut rng),
            Err(PeptideError::InvalidState(_))
        ));
    }

    #[test]
    fn substitute_keeps_length() {
        let mut rng = StdRng::seed_from_u64(2);
        let mutated = substitute_amino_acid(peptide("KKKK"), &mut rng).unwrap();
        assert_eq!(mutated.len(), 4);
        assert!(substitute_amino_acid(Vec::new(), &mut rng).is_err());
    }

    #[test]
    fn insert_then_delete_restores_length() {
        let mut rng = StdRng::seed_from_u64(17);
        for len in 1..12 {
            let original: Genome = "ACDEFGHIKLMN".chars().take(len).collect();
            let grown = insert_amino_acid(original.clone(), &mut rng);
            let restored = delete_amino_acid(grown, &mut rng).unwrap();
            assert_eq!(restored.len(), original.len());
        }
    }

    #[test]
    fn mutate_never_fails_on_short_genomes() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            assert_eq!(mutate(Vec::new(), &mut rng).unwrap().len(), 1);
            let single = mutate(peptide("W"), &mut rng).unwrap();
            assert!(single.len() <= 2);
        }
    }

    #[test]
    fn crossover_uses_first_parent_length() {
        let mut rng = StdRng::seed_from_u64(4);
        let long = peptide("AAAAAAAAAA");
        let short = peptide("CC");

        for _ in 0..100 {
            let child = crossover(&long, &short, &mut rng);
            // Prefix always comes from parent1
            assert!(child.iter().take_while(|&&c| c == 'A').count() >= child.len().saturating_sub(2));
            assert!(!child.is_empty());
            assert!(child.len() <= long.len());
        }

        // Index past the end of the shorter parent yields a pure prefix
        let mut saw_pure_prefix = false;
        for _ in 0..200 {
            let child = crossover(&long, &short, &mut rng);
            if child.iter().all(|&c| c == 'A') {
                saw_pure_prefix = true;
            }
        }
        assert!(saw_pure_prefix);
    }

    #[test]
    fn crossover_with_empty_first_parent_copies_second() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(crossover(&[], &peptide("KLW"), &mut rng), peptide("KLW"));
    }

    #[test]
    fn tournament_winner_is_never_worse_ranked() {
        let mut rng = StdRng::seed_from_u64(31);
        let population: Vec<Individual> = (0..10)
            .map(|i| {
                let mut individual = Individual::new(peptide("AK"), vec![i as f64]);
                individual.rank = Some(i % 4);
                individual.crowding_distance = (i % 3) as f64;
                individual
            })
            .collect();

        for _ in 0..200 {
            // Replay the same draws to recover the compared candidates
            let mut replay = rng.clone();
            let winner = tournament_selection(&population, 3, &mut rng).unwrap();
            assert!(population.iter().any(|p| std::ptr::eq(p, winner)));

            for _ in 0..3 {
                let compared = &population[replay.gen_range(0..population.len())];
                assert!(winner.rank <= compared.rank);
            }
        }

        // A full-size tournament with replacement almost always includes rank 0
        let best = tournament_selection(&population, 200, &mut rng).unwrap();
        assert_eq!(best.rank, Some(0));
        assert_eq!(best.crowding_distance, 2.0);
    }

    #[test]
    fn tournament_on_empty_population_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(tournament_selection(&[], 2, &mut rng).is_err());
    }
}
