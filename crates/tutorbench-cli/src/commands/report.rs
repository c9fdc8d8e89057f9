//! The `tutorbench report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use tutorbench_core::metrics::ScenarioMetrics;
use tutorbench_core::report::BenchmarkReport;
use tutorbench_providers::config::load_config_from;

pub fn execute(results: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let path = match results {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.benchmark.results_file,
    };

    let report = BenchmarkReport::load_json(&path)?;
    print_summary(&report);
    println!("\nDetailed results: {} records", report.detailed_results.len());

    Ok(())
}

/// Print the human-readable metrics summary for a report.
pub fn print_summary(report: &BenchmarkReport) {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK RESULTS SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "Total Problems Tested: {}",
        report.benchmark_summary.total_problems_tested
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Metric",
        "Perfect Student",
        "Imperfect Student",
    ]);

    let rows: [(&str, fn(&ScenarioMetrics) -> f64); 4] = [
        ("Logic Correct Rate", |m| m.logic_correct_rate),
        ("Correction Rate", |m| m.correction_rate),
        ("Solution Match Rate", |m| m.solution_match_rate),
        ("Perfect Performance Rate", |m| m.perfect_performance_rate),
    ];

    let perfect = report.benchmark_summary.perfect_student_metrics.as_ref();
    let imperfect = report.benchmark_summary.imperfect_student_metrics.as_ref();

    for (name, metric) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format_rate(perfect.map(metric))),
            Cell::new(format_rate(imperfect.map(metric))),
        ]);
    }
    table.add_row(vec![
        Cell::new("Scenarios"),
        Cell::new(
            perfect
                .map(|m| m.total_problems.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        Cell::new(
            imperfect
                .map(|m| m.total_problems.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);

    println!("{table}");
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "-".to_string(),
    }
}
