//! # Configuration
//!
//! Environment-driven configuration, loaded once at startup. A `.env`
//! file is honored when present.

use log::warn;
use std::env;
use std::path::PathBuf;

/// Default chat model for symptom analysis.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default data directory for local snapshots.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key. The app runs without it; symptom analysis is
    /// unavailable until it is set.
    pub openai_key: Option<String>,
    /// Chat model used for symptom analysis.
    pub openai_model: String,
    /// Directory holding the JSON snapshot files.
    pub data_dir: PathBuf,
}

impl Config {
    /// Build configuration from the environment (and `.env` if present).
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok();

        let openai_key = env::var("OPENAI_KEY").ok().filter(|k| !k.is_empty());
        if openai_key.is_none() {
            warn!("OPENAI_KEY not set; the symptom checker will report analysis as unavailable");
        }

        let openai_model = env::var("VITALITY_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let data_dir = env::var("VITALITY_DATA_DIR")
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Config {
            openai_key,
            openai_model,
            data_dir,
        }
    }
}
