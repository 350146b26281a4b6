//! Export of evolved Pareto fronts.
//!
//! Fronts are written as a JSON document for later analysis, and single
//! fronts as FASTA so they can be resubmitted to a scoring service.

use crate::engines::generation::individual::FrontMember;
use crate::error::PeptideError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Schema version of the JSON export
pub const SCHEMA_VERSION: &str = "1";

#[derive(Debug, Serialize, Deserialize)]
pub struct FrontExport {
    pub schema_version: String,
    /// Objective names in score order
    pub objectives: Vec<String>,
    pub fronts: Vec<Vec<ExportedPeptide>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPeptide {
    pub front: usize,
    pub label: String,
    pub length: usize,
    /// Raw evaluator scores
    pub scores: Vec<f64>,
    /// Scores after the duplicate penalty
    pub objectives: Vec<f64>,
}

impl FrontExport {
    pub fn new(fronts: &[Vec<FrontMember>], objectives: Vec<String>) -> Self {
        let fronts = fronts
            .iter()
            .enumerate()
            .map(|(front, members)| {
                members
                    .iter()
                    .map(|member| ExportedPeptide {
                        front,
                        label: member.label.clone(),
                        length: member.genome.len(),
                        scores: member.scores.clone(),
                        objectives: member.objectives.clone(),
                    })
                    .collect()
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            objectives,
            fronts,
        }
    }
}

pub fn write_fronts_json<P: AsRef<Path>>(
    path: P,
    fronts: &[Vec<FrontMember>],
    objectives: Vec<String>,
) -> Result<(), PeptideError> {
    let export = FrontExport::new(fronts, objectives);
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// FASTA records using each label as its own header.
pub fn format_fasta<S: AsRef<str>>(labels: &[S]) -> String {
    let mut fasta = String::new();
    for label in labels {
        let label = label.as_ref();
        let _ = writeln!(fasta, ">{}\n{}", label, label);
    }
    fasta
}

pub fn write_front_fasta<P: AsRef<Path>>(path: P, front: &[FrontMember]) -> Result<(), PeptideError> {
    let labels: Vec<&str> = front.iter().map(|m| m.label.as_str()).collect();
    std::fs::write(path, format_fasta(&labels))?;
    Ok(())
}

/// Parse FASTA text into sequences. Multi-line records are joined and
/// headers are discarded.
pub fn parse_fasta(text: &str) -> Vec<String> {
    let mut sequences = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with('>') {
            if let Some(sequence) = current.take() {
                sequences.push(sequence);
            }
            current = Some(String::new());
        } else if !line.is_empty() {
            current.get_or_insert_with(String::new).push_str(line);
        }
    }
    if let Some(sequence) = current {
        sequences.push(sequence);
    }

    sequences.retain(|s| !s.is_empty());
    sequences
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<String>, PeptideError> {
    Ok(parse_fasta(&std::fs::read_to_string(path)?))
}
