//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tutorbench() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("tutorbench").unwrap()
}

#[test]
fn help_output() {
    tutorbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Math-tutor agent benchmark harness"));
}

#[test]
fn version_output() {
    tutorbench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tutorbench"));
}

#[test]
fn validate_counts_problems() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("problems.csv");
    std::fs::write(&csv, "question,solution\n2+3,5\n7*6,42\n").unwrap();

    tutorbench()
        .arg("validate")
        .arg("--problems")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 problems"))
        .stdout(predicate::str::contains("All problem files valid"));
}

#[test]
fn validate_skips_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.csv");
    std::fs::write(&good, "Question,Solution\nx+1=2,x=1\n").unwrap();
    let missing = dir.path().join("missing.csv");

    tutorbench()
        .arg("validate")
        .arg("--problems")
        .arg(&good)
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 problems"))
        .stdout(predicate::str::contains("SKIPPED"))
        .stdout(predicate::str::contains("1 file(s) could not be loaded"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    tutorbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tutorbench.toml"))
        .stdout(predicate::str::contains("Created benchmark_data/example.csv"));

    assert!(dir.path().join("tutorbench.toml").exists());
    assert!(dir.path().join("benchmark_data/example.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    tutorbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    tutorbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_problems_validate() {
    let dir = TempDir::new().unwrap();

    tutorbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    tutorbench()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--problems")
        .arg("benchmark_data/example.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 problems"));
}

#[test]
fn report_prints_summary() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results.json");
    std::fs::write(&results, SAMPLE_REPORT).unwrap();

    tutorbench()
        .arg("report")
        .arg("--results")
        .arg(&results)
        .assert()
        .success()
        .stdout(predicate::str::contains("BENCHMARK RESULTS SUMMARY"))
        .stdout(predicate::str::contains("Total Problems Tested: 1"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn report_nonexistent_file_fails() {
    tutorbench()
        .arg("report")
        .arg("--results")
        .arg("no_such_report.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

/// A minimal valid report file, as `run` would write it.
const SAMPLE_REPORT: &str = r#"{
    "benchmark_summary": {
        "total_problems_tested": 1,
        "perfect_student_metrics": {
            "logic_correct_rate": 1.0,
            "correction_rate": 1.0,
            "solution_match_rate": 1.0,
            "perfect_performance_rate": 1.0,
            "total_problems": 1
        },
        "imperfect_student_metrics": {
            "logic_correct_rate": 0.0,
            "correction_rate": 0.0,
            "solution_match_rate": 0.0,
            "perfect_performance_rate": 0.0,
            "total_problems": 1
        }
    },
    "detailed_results": [
        {
            "question": "2+3",
            "expected_solution": "5",
            "scenario": "perfect_student",
            "logic_correct": true,
            "corrected_when_wrong": true,
            "solution_matches": true,
            "perfect_performance": true,
            "evaluation_details": "Flawless.",
            "conversation_length": 2
        },
        {
            "question": "2+3",
            "expected_solution": "5",
            "scenario": "imperfect_student",
            "logic_correct": false,
            "corrected_when_wrong": false,
            "solution_matches": false,
            "perfect_performance": false,
            "evaluation_details": "Missed an error.",
            "conversation_length": 2
        }
    ]
}"#;
