//! tutorbench-providers — tutor agent and judge model backends.
//!
//! Implements the `TutorAgent` trait for Dify-hosted agents and the
//! `CompletionModel` trait for Gemini, plus mock implementations for
//! exercising the benchmark engine without network calls.

pub mod config;
pub mod dify;
pub mod gemini;
pub mod mock;

pub use config::{load_config, load_config_from, BenchConfig};
pub use dify::DifyTutor;
pub use gemini::GeminiModel;
