//! Service provider configuration.

use anyhow::Context;
use oculi_core::completion::CompletionService;
use oculi_openai::OpenAiClient;

use super::Cli;

/// Creates the completion service from CLI configuration.
///
/// # Errors
///
/// Returns an error if the endpoint configuration is invalid or the HTTP
/// client cannot be initialized.
pub fn create_completion_service(cli: &Cli) -> anyhow::Result<CompletionService> {
    let client = OpenAiClient::new(cli.openai.clone())
        .context("failed to create OpenAI-compatible client")?;
    Ok(client.into_service())
}
