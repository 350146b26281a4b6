use super::evaluator::{FitnessEvaluator, ScoredSequence};
use crate::config::EvaluatorConfig;
use crate::error::PeptideError;
use crate::export::format_fasta;
use log::debug;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Scores peptides by piping them as FASTA through an external command.
///
/// The command receives `>LABEL\nLABEL\n` records on stdin and must print one
/// line per peptide, in order: the label followed by its scores, separated by
/// whitespace, commas or tabs. Blank lines and lines starting with `#` are
/// ignored.
pub struct ProcessEvaluator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessEvaluator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout())
    }

    fn spawn(&self) -> Result<Child, PeptideError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PeptideError::EvaluatorUnavailable(format!(
                    "Failed to start '{}': {}",
                    self.program, e
                ))
            })
    }

    /// Wait for the child, killing it once the timeout expires.
    fn wait_with_timeout(&self, child: &mut Child) -> Result<std::process::ExitStatus, PeptideError> {
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(e) => {
                    reap(child);
                    return Err(PeptideError::EvaluatorUnavailable(format!(
                        "Lost track of '{}': {}",
                        self.program, e
                    )));
                }
            }
            if started.elapsed() >= self.timeout {
                reap(child);
                return Err(PeptideError::EvaluatorUnavailable(format!(
                    "'{}' did not finish within {:?}",
                    self.program, self.timeout
                )));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn read_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buffer);
        }
        buffer
    })
}

fn join_pipe(handle: JoinHandle<String>) -> Result<String, PeptideError> {
    handle.join().map_err(|_| {
        PeptideError::EvaluatorUnavailable("Evaluator output reader panicked".to_string())
    })
}

/// Parse `LABEL SCORE [SCORE...]` lines.
pub fn parse_scores(output: &str) -> Result<Vec<ScoredSequence>, PeptideError> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let mut fields = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|field| !field.is_empty());

            let label = fields.next().ok_or_else(|| {
                PeptideError::EvaluatorProtocol(format!("Empty score line: '{}'", line))
            })?;

            let scores = fields
                .map(|field| {
                    field.parse::<f64>().map_err(|_| {
                        PeptideError::EvaluatorProtocol(format!(
                            "Invalid score '{}' in line '{}'",
                            field, line
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, PeptideError>>()?;

            Ok(ScoredSequence::new(label, scores))
        })
        .collect()
}

impl FitnessEvaluator for ProcessEvaluator {
    fn evaluate(&mut self, sequences: &[String]) -> Result<Vec<ScoredSequence>, PeptideError> {
        // An empty record has no sequence line, so the scorer's reply cannot be matched to it.
        if let Some(position) = sequences.iter().position(|s| s.is_empty()) {
            return Err(PeptideError::EvaluatorProtocol(format!(
                "Sequence {} is empty and cannot be staged as FASTA",
                position
            )));
        }
        debug!("Submitting {} peptides to '{}'", sequences.len(), self.program);

        let mut child = self.spawn()?;
        let input = format_fasta(sequences);

        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || {
                // The child may legitimately exit without draining stdin.
                let _ = stdin.write_all(input.as_bytes());
            })
        });
        let stdout = read_pipe(child.stdout.take());
        let stderr = read_pipe(child.stderr.take());

        let status = self.wait_with_timeout(&mut child)?;

        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let output = join_pipe(stdout)?;
        let errors = join_pipe(stderr)?;

        if !status.success() {
            return Err(PeptideError::EvaluatorUnavailable(format!(
                "'{}' exited with {}: {}",
                self.program,
                status,
                errors.trim()
            )));
        }

        parse_scores(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        let output = "# label desirability risk\nGLFD,0.75,0.1\n\nAAAK\t0.2 0.9\n";
        let scored = parse_scores(output).unwrap();

        assert_eq!(
            scored,
            vec![
                ScoredSequence::new("GLFD", vec![0.75, 0.1]),
                ScoredSequence::new("AAAK", vec![0.2, 0.9]),
            ]
        );
    }

    #[test]
    fn rejects_non_numeric_scores() {
        assert!(matches!(
            parse_scores("GLFD high"),
            Err(PeptideError::EvaluatorProtocol(_))
        ));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let mut evaluator = ProcessEvaluator::new(
            "/nonexistent/peptide-scorer",
            Vec::new(),
            Duration::from_secs(1),
        );
        assert!(matches!(
            evaluator.evaluate(&["AK".to_string()]),
            Err(PeptideError::EvaluatorUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn scores_through_shell_command() {
        let script = r#"while read -r header; do read -r seq; echo "$seq ${#seq} 0.5"; done"#;
        let mut evaluator = ProcessEvaluator::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            Duration::from_secs(10),
        );

        let scored = evaluator
            .evaluate(&["GLFD".to_string(), "AK".to_string()])
            .unwrap();

        assert_eq!(
            scored,
            vec![
                ScoredSequence::new("GLFD", vec![4.0, 0.5]),
                ScoredSequence::new("AK", vec![2.0, 0.5]),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn empty_sequence_is_rejected_before_spawning() {
        let script = r#"while read -r header; do read -r seq; echo "$seq ${#seq} 0.5"; done"#;
        let mut evaluator = ProcessEvaluator::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            Duration::from_secs(10),
        );

        let err = evaluator
            .evaluate(&["AK".to_string(), String::new()])
            .unwrap_err();
        assert!(matches!(err, PeptideError::EvaluatorProtocol(ref m) if m.contains("empty")));
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_unavailable() {
        let mut evaluator = ProcessEvaluator::new(
            "sh",
            vec!["-c".to_string(), "echo 'service down' >&2; exit 3".to_string()],
            Duration::from_secs(10),
        );
        let err = evaluator.evaluate(&["AK".to_string()]).unwrap_err();
        assert!(matches!(err, PeptideError::EvaluatorUnavailable(ref m) if m.contains("service down")));
    }

    #[cfg(unix)]
    #[test]
    fn slow_command_times_out() {
        let mut evaluator = ProcessEvaluator::new(
            "sh",
            vec!["-c".to_string(), "exec sleep 5".to_string()],
            Duration::from_millis(200),
        );
        let started = Instant::now();
        let result = evaluator.evaluate(&["AK".to_string()]);

        assert!(matches!(result, Err(PeptideError::EvaluatorUnavailable(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
