//! Genome representation for peptide evolution
//!
//! A genome is an ordered sequence of one-letter amino-acid codes. Its length is
//! bounded only when the seed population is generated; insertion, deletion and
//! crossover let it drift afterwards.
//!
//! The decoded label (the symbols joined into a `String`) is what the external
//! evaluator scores and what duplicate detection keys on.
//!
//! # Example
//!
//! ```
//! use peptide_nsga::engines::generation::genome::{decode, encode};
//!
//! let genome = encode("GLFDIVKK").unwrap();
//! assert_eq!(genome.len(), 8);
//! assert_eq!(decode(&genome), "GLFDIVKK");
//! ```
use crate::error::PeptideError;
use rand::Rng;

pub type Genome = Vec<char>;

/// The 20 standard amino acids.
pub const AMINO_ACIDS: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V',
    'W', 'Y',
];

pub fn is_amino_acid(symbol: char) -> bool {
    AMINO_ACIDS.contains(&symbol)
}

pub fn random_amino_acid<R: Rng>(rng: &mut R) -> char {
    AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())]
}

pub fn decode(genome: &[char]) -> String {
    genome.iter().collect()
}

pub fn encode(label: &str) -> Result<Genome, PeptideError> {
    label
        .chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if is_amino_acid(upper) {
                Ok(upper)
            } else {
                Err(PeptideError::InvalidState(format!(
                    "'{}' in '{}' is not an amino acid",
                    c, label
                )))
            }
        })
        .collect()
}

/// Generate `count` peptides with lengths drawn uniformly from `[min_len, max_len]`
pub fn generate_random_peptides<R: Rng>(
    min_len: usize,
    max_len: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Genome>, PeptideError> {
    if min_len < 1 || max_len < min_len {
        return Err(PeptideError::InvalidRange(format!(
            "Cannot generate peptides with lengths {}..={}",
            min_len, max_len
        )));
    }
    if count < 1 {
        return Err(PeptideError::InvalidRange(
            "Peptide count must be at least 1".to_string(),
        ));
    }

    Ok((0..count)
        .map(|_| {
            let length = rng.gen_range(min_len..=max_len);
            (0..length).map(|_| random_amino_acid(rng)).collect()
        })
        .collect())
}
