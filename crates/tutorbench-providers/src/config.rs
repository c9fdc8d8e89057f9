//! Benchmark configuration loading.
//!
//! A single `BenchConfig` is constructed at process start and handed by
//! reference to each component's constructor; nothing reads the environment
//! after that point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tutor agent endpoint settings.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Base URL of the Dify-compatible API.
    #[serde(default = "default_tutor_url")]
    pub base_url: String,
    /// Bearer credential for the tutor application.
    #[serde(default)]
    pub api_key: String,
    /// End-user identifier sent with every request.
    #[serde(default = "default_user")]
    pub user: String,
}

impl std::fmt::Debug for TutorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("user", &self.user)
            .finish()
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            base_url: default_tutor_url(),
            api_key: String::new(),
            user: default_user(),
        }
    }
}

/// Judge model endpoint settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// API key for the judge model.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the Gemini-compatible API.
    #[serde(default = "default_judge_url")]
    pub base_url: String,
    /// Model identifier.
    #[serde(default = "default_judge_model")]
    pub model: String,
}

impl std::fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_judge_url(),
            model: default_judge_model(),
        }
    }
}

/// Benchmark pacing and persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSettings {
    /// Upper bound on conversation turns per scenario.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Fixed delay between network round-trips, in seconds.
    #[serde(default = "default_turn_delay")]
    pub turn_delay_secs: u64,
    /// Where results are persisted and resumed from.
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            turn_delay_secs: default_turn_delay(),
            results_file: default_results_file(),
        }
    }
}

/// Tutoring resource (tool server) settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Root directory of the notes tree (`<root>/<grade>/module<N>/...`).
    #[serde(default = "default_notes_dir")]
    pub notes_dir: PathBuf,
    /// WolframAlpha application identifier.
    #[serde(default)]
    pub wolfram_app_id: String,
}

impl std::fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsConfig")
            .field("notes_dir", &self.notes_dir)
            .field("wolfram_app_id", &"***")
            .finish()
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            wolfram_app_id: String::new(),
        }
    }
}

/// Top-level tutorbench configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub tutor: TutorConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub benchmark: BenchmarkSettings,
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_tutor_url() -> String {
    "http://127.0.0.1/v1".to_string()
}
fn default_user() -> String {
    "benchmark".to_string()
}
fn default_judge_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_judge_model() -> String {
    "gemini-2.0-flash-001".to_string()
}
fn default_max_turns() -> usize {
    10
}
fn default_turn_delay() -> u64 {
    5
}
fn default_results_file() -> PathBuf {
    PathBuf::from("math_tutor_benchmark_results.json")
}
fn default_notes_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from the default locations.
///
/// Search order:
/// 1. `tutorbench.toml` in the current directory
/// 2. `~/.config/tutorbench/config.toml`
///
/// A `.env` file is honored, and `DIFY_API_KEY`, `GEMINI_API_KEY`, and
/// `WOLFRAMALPHA_APP_ID` override the corresponding config fields.
pub fn load_config() -> Result<BenchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BenchConfig> {
    dotenvy::dotenv().ok();

    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tutorbench.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<BenchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BenchConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("DIFY_API_KEY") {
        config.tutor.api_key = key;
    }
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        config.judge.api_key = key;
    }
    if let Ok(app_id) = std::env::var("WOLFRAMALPHA_APP_ID") {
        config.tools.wolfram_app_id = app_id;
    }

    // Resolve ${VAR} references in credential and endpoint fields
    config.tutor.api_key = resolve_env_vars(&config.tutor.api_key);
    config.tutor.base_url = resolve_env_vars(&config.tutor.base_url);
    config.judge.api_key = resolve_env_vars(&config.judge.api_key);
    config.judge.base_url = resolve_env_vars(&config.judge.base_url);
    config.tools.wolfram_app_id = resolve_env_vars(&config.tools.wolfram_app_id);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tutorbench"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.tutor.base_url, "http://127.0.0.1/v1");
        assert_eq!(config.tutor.user, "benchmark");
        assert_eq!(config.judge.model, "gemini-2.0-flash-001");
        assert_eq!(config.benchmark.max_turns, 10);
        assert_eq!(config.benchmark.turn_delay_secs, 5);
        assert_eq!(
            config.benchmark.results_file,
            PathBuf::from("math_tutor_benchmark_results.json")
        );
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TUTORBENCH_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_TUTORBENCH_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_TUTORBENCH_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_TUTORBENCH_TEST_VAR");
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
[tutor]
base_url = "http://tutor.internal/v1"
api_key = "app-123"

[benchmark]
max_turns = 6
"#;
        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tutor.base_url, "http://tutor.internal/v1");
        assert_eq!(config.benchmark.max_turns, 6);
        // Unspecified sections fall back to defaults
        assert_eq!(config.judge.model, "gemini-2.0-flash-001");
        assert_eq!(config.tools.notes_dir, PathBuf::from("data"));
    }

    #[test]
    fn debug_masks_credentials() {
        let mut config = BenchConfig::default();
        config.tutor.api_key = "app-secret".into();
        config.judge.api_key = "gem-secret".into();
        config.tools.wolfram_app_id = "wolfram-secret".into();

        let debug = format!("{config:?}");
        assert!(!debug.contains("app-secret"));
        assert!(!debug.contains("gem-secret"));
        assert!(!debug.contains("wolfram-secret"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/tutorbench.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
