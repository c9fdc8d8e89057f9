//! The `tutorbench run` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use tutorbench_core::driver::BenchmarkDriver;
use tutorbench_core::model::{ConversationTurn, Role, Scenario, ScenarioResult};
use tutorbench_core::runner::{ProgressReporter, ScenarioRunner};
use tutorbench_core::traits::CompletionModel;
use tutorbench_providers::config::load_config_from;
use tutorbench_providers::{DifyTutor, GeminiModel};

use super::report::print_summary;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_scenario_start(&self, scenario: Scenario, question: &str) {
        eprintln!("\n{}", "=".repeat(50));
        eprintln!("Running {scenario} scenario");
        eprintln!("Question: {question}");
        eprintln!("{}", "=".repeat(50));
    }

    fn on_turn(&self, turn: &ConversationTurn) {
        let label = match turn.role {
            Role::Student => "STUDENT",
            Role::Tutor => "TUTOR",
        };
        eprintln!("{label}: {}", turn.content);
    }

    fn on_scenario_complete(&self, result: &ScenarioResult) {
        let outcome = match &result.failure {
            Some(failure) => format!("FAILED ({failure})"),
            None if result.verdict.is_perfect() => "perfect".to_string(),
            None => "graded".to_string(),
        };
        eprintln!(
            "Scenario {} done: {} turns, {outcome}",
            result.scenario,
            result.transcript.len(),
        );
    }

    fn on_run_halted(&self, reason: &str) {
        eprintln!("\n{reason}");
    }
}

pub async fn execute(
    problems: Vec<PathBuf>,
    start: Option<usize>,
    limit: Option<usize>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(
        config.benchmark.max_turns >= 1,
        "benchmark.max_turns must be at least 1"
    );

    let tutor = DifyTutor::new(&config.tutor);
    let model: Arc<dyn CompletionModel> = Arc::new(GeminiModel::new(&config.judge));
    let runner = ScenarioRunner::new(
        config.benchmark.max_turns,
        Duration::from_secs(config.benchmark.turn_delay_secs),
    );

    let mut driver = BenchmarkDriver::new(Box::new(tutor), model, runner);

    let results_file = config.benchmark.results_file.clone();
    let restored = driver.resume_from(&results_file)?;
    if restored > 0 {
        eprintln!(
            "Resuming: {restored} problem(s) already completed in {}",
            results_file.display()
        );
    }

    driver.run(&problems, start, limit, &ConsoleReporter).await?;

    let output = output.unwrap_or(results_file);
    let report = driver.write_report(&output)?;
    print_summary(&report);
    println!("\nDetailed report saved to: {}", output.display());

    Ok(())
}
