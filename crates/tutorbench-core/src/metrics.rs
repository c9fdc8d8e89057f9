//! Aggregate pass-rate metrics over scenario results.

use serde::{Deserialize, Serialize};

use crate::model::ScenarioResult;

/// Pass rates for one scenario type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Fraction of conversations with fully correct mathematical reasoning.
    pub logic_correct_rate: f64,
    /// Fraction where every student error was caught and corrected.
    pub correction_rate: f64,
    /// Fraction whose final answer matched the expected solution.
    pub solution_match_rate: f64,
    /// Fraction where all three criteria passed.
    pub perfect_performance_rate: f64,
    /// Number of results the rates were computed over.
    pub total_problems: usize,
}

/// Compute the metrics for one scenario type's results.
///
/// Returns `None` for an empty slice; rates over nothing are meaningless.
pub fn compute_metrics(results: &[&ScenarioResult]) -> Option<ScenarioMetrics> {
    if results.is_empty() {
        return None;
    }
    let total = results.len();
    let n = total as f64;
    let rate = |count: usize| count as f64 / n;

    Some(ScenarioMetrics {
        logic_correct_rate: rate(results.iter().filter(|r| r.verdict.logic_correct).count()),
        correction_rate: rate(
            results
                .iter()
                .filter(|r| r.verdict.corrected_when_wrong)
                .count(),
        ),
        solution_match_rate: rate(results.iter().filter(|r| r.verdict.solution_matches).count()),
        perfect_performance_rate: rate(results.iter().filter(|r| r.verdict.is_perfect()).count()),
        total_problems: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scenario, Verdict};

    fn result(logic: bool, corrected: bool, matches: bool) -> ScenarioResult {
        ScenarioResult {
            question: "q".into(),
            expected_solution: "s".into(),
            scenario: Scenario::PerfectStudent,
            verdict: Verdict {
                logic_correct: logic,
                corrected_when_wrong: corrected,
                solution_matches: matches,
                details: String::new(),
            },
            transcript: Vec::new(),
            failure: None,
        }
    }

    #[test]
    fn rates_over_mixed_results() {
        let results = [
            result(true, true, true),
            result(true, false, true),
            result(false, false, false),
        ];
        let refs: Vec<&ScenarioResult> = results.iter().collect();
        let metrics = compute_metrics(&refs).unwrap();

        assert!((metrics.perfect_performance_rate - 1.0 / 3.0).abs() < f64::EPSILON);
        assert!((metrics.logic_correct_rate - 2.0 / 3.0).abs() < f64::EPSILON);
        assert!((metrics.correction_rate - 1.0 / 3.0).abs() < f64::EPSILON);
        assert!((metrics.solution_match_rate - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(metrics.total_problems, 3);
    }

    #[test]
    fn all_passing_results() {
        let results = [result(true, true, true), result(true, true, true)];
        let refs: Vec<&ScenarioResult> = results.iter().collect();
        let metrics = compute_metrics(&refs).unwrap();

        assert_eq!(metrics.perfect_performance_rate, 1.0);
        assert_eq!(metrics.total_problems, 2);
    }

    #[test]
    fn empty_results_have_no_metrics() {
        assert!(compute_metrics(&[]).is_none());
    }
}
