//! tutorbench CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tutorbench", version, about = "Math-tutor agent benchmark harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark over one or more problem CSV files
    Run {
        /// Problem CSV files (columns: question, solution)
        #[arg(long, required = true, num_args = 1..)]
        problems: Vec<PathBuf>,

        /// Index of the first problem to run
        #[arg(long)]
        start: Option<usize>,

        /// Maximum number of problems to run
        #[arg(long)]
        limit: Option<usize>,

        /// Report output path (defaults to the configured results file)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the summary of a previously written report
    Report {
        /// Report JSON path (defaults to the configured results file)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check problem CSV files and report what would be loaded
    Validate {
        /// Problem CSV files
        #[arg(long, required = true, num_args = 1..)]
        problems: Vec<PathBuf>,
    },

    /// Serve the tutoring tools (notes, math solver) over MCP stdio
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example problem set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorbench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            problems,
            start,
            limit,
            output,
            config,
        } => commands::run::execute(problems, start, limit, output, config).await,
        Commands::Report { results, config } => commands::report::execute(results, config),
        Commands::Validate { problems } => commands::validate::execute(problems),
        Commands::Serve { config } => commands::serve::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
