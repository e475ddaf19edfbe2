//! CLI configuration management.
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure endpoint and run
//! oculi --input dev.json --output prediction.json --model your-model \
//!     --api-base-url "https://api.example.com/v1" --api-key "sk-..."
//!
//! # Or via environment variables
//! OPENAI_BASE_URL="https://api.example.com/v1" OPENAI_API_KEY="sk-..." \
//!     oculi --input dev.json --output prediction.json --model your-model
//! ```

mod provider;

use std::path::PathBuf;

use clap::Parser;
use oculi_openai::OpenAiConfig;
pub use provider::create_completion_service;
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Complete CLI configuration.
///
/// The retry count, backoff interval, and output token bound are fixed
/// constants of the driver and deliberately have no flags.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "oculi")]
#[command(about = "Batch multimodal inference driver")]
#[command(version)]
pub struct Cli {
    /// Path to the input dataset (a JSON array of question items).
    #[arg(long, env = "OCULI_INPUT")]
    pub input: PathBuf,

    /// Path the result set is rewritten to after every processed record.
    #[arg(long, env = "OCULI_OUTPUT")]
    pub output: PathBuf,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "OCULI_MODEL")]
    pub model: String,

    /// OpenAI-compatible endpoint configuration.
    #[clap(flatten)]
    pub openai: OpenAiConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses
    /// CLI arguments.
    ///
    /// This is the preferred way to initialize the CLI configuration as it
    /// ensures .env files are loaded before clap parses arguments, allowing
    /// environment variables from .env to be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is
    /// enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_required_arguments() {
        let cli = Cli::try_parse_from([
            "oculi",
            "--input",
            "dev.json",
            "--output",
            "prediction.json",
            "--model",
            "your-model",
            "--api-base-url",
            "https://api.example.com/v1",
            "--api-key",
            "sk-test",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("dev.json"));
        assert_eq!(cli.output, PathBuf::from("prediction.json"));
        assert_eq!(cli.model, "your-model");
        assert_eq!(cli.openai.api_key, "sk-test");
        assert_eq!(cli.openai.request_timeout_secs, 30);
    }

    #[test]
    fn test_cli_rejects_missing_model() {
        let result = Cli::try_parse_from([
            "oculi",
            "--input",
            "dev.json",
            "--output",
            "prediction.json",
            "--api-base-url",
            "https://api.example.com/v1",
            "--api-key",
            "sk-test",
        ]);
        assert!(result.is_err());
    }
}
