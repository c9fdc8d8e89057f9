//! Full benchmark orchestration.
//!
//! Loads problems, runs both scenarios per problem strictly sequentially,
//! accumulates results in the [`ResultLog`], and writes the report. A
//! failure in either scenario of a pair discards that pair and halts the
//! remaining run; resuming later skips problems whose pairs already exist
//! in the persisted report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::dataset;
use crate::judge::ConversationJudge;
use crate::log::ResultLog;
use crate::model::{Problem, Scenario};
use crate::report::BenchmarkReport;
use crate::runner::{ProgressReporter, ScenarioRunner};
use crate::simulator::StudentSimulator;
use crate::traits::{CompletionModel, TutorAgent};

/// Runs the whole benchmark and owns its accumulated results.
pub struct BenchmarkDriver {
    tutor: Box<dyn TutorAgent>,
    simulator: StudentSimulator,
    judge: ConversationJudge,
    runner: ScenarioRunner,
    log: ResultLog,
}

impl BenchmarkDriver {
    pub fn new(
        tutor: Box<dyn TutorAgent>,
        model: Arc<dyn CompletionModel>,
        runner: ScenarioRunner,
    ) -> Self {
        Self {
            tutor,
            simulator: StudentSimulator::new(Arc::clone(&model)),
            judge: ConversationJudge::new(model),
            runner,
            log: ResultLog::new(),
        }
    }

    /// Rebuild the result log from a previously written report, so a rerun
    /// skips the problems it already covered. A missing file is a fresh
    /// start. Returns the number of restored pairs.
    pub fn resume_from(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Ok(0);
        }
        let report = BenchmarkReport::load_json(path)?;
        self.log = ResultLog::from_report(&report);
        let pairs = self.log.completed_pairs();
        tracing::info!(
            "resuming from {}: {} completed pairs",
            path.display(),
            pairs
        );
        Ok(pairs)
    }

    /// Run both scenarios over the (optionally sliced) problem set.
    pub async fn run(
        &mut self,
        sources: &[PathBuf],
        start: Option<usize>,
        limit: Option<usize>,
        progress: &dyn ProgressReporter,
    ) -> Result<()> {
        let problems = slice_problems(dataset::load_problems(sources), start, limit);
        tracing::info!("loaded {} problems", problems.len());

        let skip = self.log.completed_pairs();
        for (index, problem) in problems.iter().enumerate() {
            if index < skip {
                continue;
            }
            tracing::info!("problem {}/{}: {}", index + 1, problems.len(), problem.question);

            let perfect_failed = self
                .run_scenario(problem, Scenario::PerfectStudent, progress)
                .await;
            let imperfect_failed = self
                .run_scenario(problem, Scenario::ImperfectStudent, progress)
                .await;

            // One error anywhere halts the whole run, after removing the
            // offending pair.
            if perfect_failed || imperfect_failed {
                self.log.discard_last_pair();
                progress.on_run_halted("error encountered during benchmark, stopping further tests");
                tracing::error!("error encountered during benchmark, stopping further tests");
                break;
            }
        }

        Ok(())
    }

    /// Run one scenario, append its result, and report whether it failed.
    async fn run_scenario(
        &mut self,
        problem: &Problem,
        scenario: Scenario,
        progress: &dyn ProgressReporter,
    ) -> bool {
        let result = self
            .runner
            .run(
                self.tutor.as_mut(),
                &self.simulator,
                &self.judge,
                problem,
                scenario,
                progress,
            )
            .await;
        let failed = result.is_failure();
        if let Some(failure) = &result.failure {
            tracing::error!("{scenario} scenario failed: {failure}");
        }
        self.log.append(result);
        failed
    }

    /// Generate the report from the current log and persist it.
    pub fn write_report(&self, path: &Path) -> Result<BenchmarkReport> {
        let report = BenchmarkReport::from_log(&self.log);
        report.save_json(path)?;
        Ok(report)
    }

    pub fn log(&self) -> &ResultLog {
        &self.log
    }
}

/// Apply the optional `[start, start+limit)` window.
fn slice_problems(
    problems: Vec<Problem>,
    start: Option<usize>,
    limit: Option<usize>,
) -> Vec<Problem> {
    match (start, limit) {
        (Some(start), Some(limit)) => problems.into_iter().skip(start).take(limit).collect(),
        (Some(start), None) => problems.into_iter().skip(start).collect(),
        (None, Some(limit)) => problems.into_iter().take(limit).collect(),
        (None, None) => problems,
    }
}
