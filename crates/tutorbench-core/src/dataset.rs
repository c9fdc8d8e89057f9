//! Problem set loading from CSV files.
//!
//! Sources are CSV files with a header row; `question`/`Question` and
//! `solution`/`Solution` columns are recognized (lowercase wins when both
//! are present). Rows missing either field are skipped, and unreadable
//! files are logged and skipped rather than aborting the whole load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Problem;

/// Load problems from multiple CSV files, in order.
///
/// Files that cannot be read or lack the expected columns are skipped with
/// a warning.
pub fn load_problems(sources: &[PathBuf]) -> Vec<Problem> {
    let mut problems = Vec::new();
    for path in sources {
        match load_problem_file(path) {
            Ok(mut loaded) => {
                tracing::debug!("loaded {} problems from {}", loaded.len(), path.display());
                problems.append(&mut loaded);
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
            }
        }
    }
    problems
}

/// Load problems from a single CSV file.
pub fn load_problem_file(path: &Path) -> Result<Vec<Problem>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to read problem file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row: {}", path.display()))?
        .clone();

    let question_col = find_column(&headers, "question", "Question")
        .with_context(|| format!("no question column in {}", path.display()))?;
    let solution_col = find_column(&headers, "solution", "Solution")
        .with_context(|| format!("no solution column in {}", path.display()))?;

    let mut problems = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("malformed row in {}", path.display()))?;
        let question = record.get(question_col).unwrap_or("").trim();
        let solution = record.get(solution_col).unwrap_or("").trim();
        if question.is_empty() || solution.is_empty() {
            continue;
        }
        problems.push(Problem {
            question: question.to_string(),
            expected_solution: solution.to_string(),
        });
    }

    Ok(problems)
}

fn find_column(headers: &csv::StringRecord, lower: &str, upper: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == lower)
        .or_else(|| headers.iter().position(|h| h == upper))
}
