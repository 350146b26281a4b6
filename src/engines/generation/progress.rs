use super::evolution_engine::{GenerationSummary, ProgressCallback};
use log::info;

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        info!("Generation: {}/{}", generation, total);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        info!(
            "Generation {} complete. Fronts: {}, front 0 size: {}, best desirability: {:.4}",
            summary.generation, summary.front_count, summary.first_front_size, summary.best_desirability
        );
    }

    fn on_batch_evaluated(&mut self, generation: usize, batch_size: usize) {
        info!("  Evaluated {} peptides (generation {})", batch_size, generation);
    }
}

/// For reporting to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart { generation: usize, total: usize },
    GenerationComplete(GenerationSummary),
    BatchEvaluated { generation: usize, batch_size: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart { generation, total });
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(summary.clone()));
    }

    fn on_batch_evaluated(&mut self, generation: usize, batch_size: usize) {
        let _ = self.sender.send(ProgressMessage::BatchEvaluated {
            generation,
            batch_size,
        });
    }
}
