//! Append-only log of scenario results for one benchmark run.
//!
//! Results arrive in pairs per problem (perfect, then imperfect). The log
//! can be rebuilt from a persisted report to resume an interrupted run;
//! reconstruction is lossy because reports do not retain transcripts.

use crate::model::{ScenarioResult, Verdict};
use crate::report::BenchmarkReport;

/// The accumulated per-scenario outcome records of a benchmark run.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<ScenarioResult>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from a persisted report.
    ///
    /// Transcripts are not persisted, so reconstructed results carry empty
    /// ones; only the verdicts and identities survive.
    pub fn from_report(report: &BenchmarkReport) -> Self {
        let results = report
            .detailed_results
            .iter()
            .map(|r| ScenarioResult {
                question: r.question.clone(),
                expected_solution: r.expected_solution.clone(),
                scenario: r.scenario,
                verdict: Verdict {
                    logic_correct: r.logic_correct,
                    corrected_when_wrong: r.corrected_when_wrong,
                    solution_matches: r.solution_matches,
                    details: r.evaluation_details.clone(),
                },
                transcript: Vec::new(),
                failure: None,
            })
            .collect();
        Self { results }
    }

    pub fn append(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    /// Remove the most recent problem's pair of results.
    ///
    /// Used by the driver to drop the offending pair before halting on an
    /// error.
    pub fn discard_last_pair(&mut self) {
        self.results.pop();
        self.results.pop();
    }

    /// Number of problems with both scenarios completed.
    pub fn completed_pairs(&self) -> usize {
        self.results.len() / 2
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter()
    }
}
