#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod dataset;

use std::process;

use anyhow::Context;
use oculi_runner::InferenceRunner;

use crate::config::{create_completion_service, Cli};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "oculi_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "oculi_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "oculi_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    log_startup_info();
    log_run_config(&cli);

    let service = create_completion_service(&cli).context("failed to create completion client")?;
    let records = dataset::load(&cli.input)?;

    let runner = InferenceRunner::new(service, cli.model.clone(), cli.output.clone());
    let summary = runner.run(&records).await.context("inference run failed")?;

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        processed = summary.processed,
        failed = summary.failed,
        output = %cli.output.display(),
        "Run complete"
    );

    Ok(())
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting oculi driver"
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        features = ?enabled_features(),
        "build information"
    );
}

/// Logs the effective run configuration.
fn log_run_config(cli: &Cli) {
    tracing::info!(
        target: TRACING_TARGET_CONFIG,
        input = %cli.input.display(),
        output = %cli.output.display(),
        model = %cli.model,
        api_base_url = %cli.openai.api_base_url,
        "run configuration"
    );
}

/// Returns a list of enabled compile-time features.
fn enabled_features() -> Vec<&'static str> {
    [cfg!(feature = "dotenv").then_some("dotenv")]
        .into_iter()
        .flatten()
        .collect()
}
