use anyhow::Context;
use log::info;
use peptide_nsga::config::ConfigManager;
use peptide_nsga::engines::evaluation::{CachedEvaluator, ProcessEvaluator, RetryingEvaluator};
use peptide_nsga::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use peptide_nsga::export::{write_front_fasta, write_fronts_json};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .get(1)
        .context("usage: peptide-nsga <config.toml> [output_dir]")?;
    let output_dir = PathBuf::from(args.get(2).map(|s| s.as_str()).unwrap_or("."));

    let manager = ConfigManager::new();
    manager
        .load_from_file(config_path)
        .with_context(|| format!("loading {}", config_path))?;
    let config = manager.get();

    info!(
        "Evolving {} peptides of length {}..={} for {} generations",
        config.evolution.population_size,
        config.evolution.lower_length,
        config.evolution.upper_length,
        config.evolution.num_generations
    );

    let evaluator = CachedEvaluator::new(
        RetryingEvaluator::new(
            ProcessEvaluator::from_config(&config.evaluator),
            config.evaluator.max_retries,
            config.evaluator.backoff(),
        ),
        config.evaluator.cache_capacity,
    );

    let objective_names: Vec<String> = config
        .evolution
        .objectives
        .iter()
        .map(|o| o.name.clone())
        .collect();

    let mut engine = EvolutionEngine::new(config.evolution, evaluator)?;
    let fronts = engine.run(ConsoleProgressCallback)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    write_fronts_json(output_dir.join("fronts.json"), &fronts, objective_names)?;
    if let Some(first) = fronts.first() {
        write_front_fasta(output_dir.join("front0.fasta"), first)?;

        for member in first {
            println!("{}\t{:?}", member.label, member.scores);
        }
    }

    info!(
        "Wrote {} fronts to {}",
        fronts.len(),
        output_dir.display()
    );
    Ok(())
}
