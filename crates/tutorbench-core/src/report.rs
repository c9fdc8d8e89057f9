//! Benchmark report types with JSON persistence.
//!
//! The report is recomputed in full from the result log on every
//! generation. Detailed records carry the transcript length but never the
//! transcript itself, so a resumed run cannot reconstruct conversations.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::log::ResultLog;
use crate::metrics::{compute_metrics, ScenarioMetrics};
use crate::model::{Scenario, ScenarioResult};

/// A complete benchmark report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Unique report identifier.
    #[serde(default = "Uuid::new_v4")]
    pub run_id: Uuid,
    /// When the report was generated.
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
    /// Aggregate pass rates per scenario type.
    pub benchmark_summary: BenchmarkSummary,
    /// One record per completed scenario, in run order.
    pub detailed_results: Vec<DetailedResult>,
}

/// Aggregate section of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    /// Number of problems with both scenarios completed.
    pub total_problems_tested: usize,
    /// Metrics for the perfect-student runs, absent when none completed.
    pub perfect_student_metrics: Option<ScenarioMetrics>,
    /// Metrics for the imperfect-student runs, absent when none completed.
    pub imperfect_student_metrics: Option<ScenarioMetrics>,
}

/// One persisted scenario outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedResult {
    pub question: String,
    pub expected_solution: String,
    pub scenario: Scenario,
    pub logic_correct: bool,
    pub corrected_when_wrong: bool,
    pub solution_matches: bool,
    pub perfect_performance: bool,
    pub evaluation_details: String,
    /// Turn count of the conversation; the transcript itself is not kept.
    pub conversation_length: usize,
}

impl DetailedResult {
    fn from_result(result: &ScenarioResult) -> Self {
        Self {
            question: result.question.clone(),
            expected_solution: result.expected_solution.clone(),
            scenario: result.scenario,
            logic_correct: result.verdict.logic_correct,
            corrected_when_wrong: result.verdict.corrected_when_wrong,
            solution_matches: result.verdict.solution_matches,
            perfect_performance: result.verdict.is_perfect(),
            evaluation_details: result.verdict.details.clone(),
            conversation_length: result.transcript.len(),
        }
    }
}

impl BenchmarkReport {
    /// Build a report from the result log, recomputing all metrics.
    pub fn from_log(log: &ResultLog) -> Self {
        let perfect: Vec<&ScenarioResult> = log
            .iter()
            .filter(|r| r.scenario == Scenario::PerfectStudent)
            .collect();
        let imperfect: Vec<&ScenarioResult> = log
            .iter()
            .filter(|r| r.scenario == Scenario::ImperfectStudent)
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            benchmark_summary: BenchmarkSummary {
                total_problems_tested: log.len() / 2,
                perfect_student_metrics: compute_metrics(&perfect),
                imperfect_student_metrics: compute_metrics(&imperfect),
            },
            detailed_results: log.iter().map(DetailedResult::from_result).collect(),
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BenchmarkReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
