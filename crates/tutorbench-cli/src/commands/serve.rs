//! The `tutorbench serve` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorbench_providers::config::load_config_from;
use tutorbench_tools::server::{serve_stdio, TutorToolServer};
use tutorbench_tools::{MathSolver, NotesStore};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let notes = NotesStore::new(config.tools.notes_dir.clone());
    let solver = MathSolver::new(&config.tools.wolfram_app_id, None);

    serve_stdio(TutorToolServer::new(notes, solver)).await
}
