//! The `tutorbench validate` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorbench_core::dataset::load_problem_file;

pub fn execute(problems: Vec<PathBuf>) -> Result<()> {
    let mut total = 0usize;
    let mut failed = 0usize;

    for path in &problems {
        match load_problem_file(path) {
            Ok(loaded) => {
                println!("{}: {} problems", path.display(), loaded.len());
                total += loaded.len();
            }
            Err(e) => {
                println!("{}: SKIPPED ({e:#})", path.display());
                failed += 1;
            }
        }
    }

    println!("\n{total} problems across {} file(s)", problems.len() - failed);
    if failed > 0 {
        println!("{failed} file(s) could not be loaded.");
    } else {
        println!("All problem files valid.");
    }

    Ok(())
}
