//! The `tutorbench init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create tutorbench.toml
    if std::path::Path::new("tutorbench.toml").exists() {
        println!("tutorbench.toml already exists, skipping.");
    } else {
        std::fs::write("tutorbench.toml", SAMPLE_CONFIG)?;
        println!("Created tutorbench.toml");
    }

    // Create example problem set
    std::fs::create_dir_all("benchmark_data")?;
    let example_path = std::path::Path::new("benchmark_data/example.csv");
    if example_path.exists() {
        println!("benchmark_data/example.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PROBLEMS)?;
        println!("Created benchmark_data/example.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit tutorbench.toml with your API keys");
    println!("  2. Run: tutorbench validate --problems benchmark_data/example.csv");
    println!("  3. Run: tutorbench run --problems benchmark_data/example.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tutorbench configuration

[tutor]
base_url = "http://127.0.0.1/v1"
api_key = "${DIFY_API_KEY}"
user = "benchmark"

[judge]
api_key = "${GEMINI_API_KEY}"
model = "gemini-2.0-flash-001"

[benchmark]
max_turns = 10
turn_delay_secs = 5
results_file = "math_tutor_benchmark_results.json"

[tools]
notes_dir = "data"
wolfram_app_id = "${WOLFRAMALPHA_APP_ID}"
"#;

const EXAMPLE_PROBLEMS: &str = "question,solution
\"Solve |2x+3|=5\",\"x=1 or x=-4\"
\"What is 3/4 + 1/8?\",\"7/8\"
\"Simplify 2(x+3) - 4\",\"2x+2\"
";
