//! OpenAI-compatible chat completion client.

use std::fmt;
use std::sync::Arc;

use oculi_core::completion::{
    CompletionProvider, CompletionRequest, CompletionResponse, CompletionService, Usage,
};
use reqwest::Client;

use crate::config::OpenAiConfig;
use crate::error::Error;
use crate::wire::{ChatCompletionRequest, ChatCompletionResponse};

/// Tracing target for client operations.
pub const TRACING_TARGET: &str = "oculi_openai::client";

/// Inner client that holds the HTTP client and configuration.
struct ClientInner {
    http: Client,
    config: OpenAiConfig,
}

impl fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInner")
            .field("api_base_url", &self.config.api_base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Issues one synchronous multimodal chat request per call and extracts the
/// first choice's message text. Any transport failure, non-2xx response, or
/// malformed response shape raises to the caller uninterpreted; the client
/// performs no retry of its own.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    inner: Arc<ClientInner>,
}

impl OpenAiClient {
    /// Creates a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: OpenAiConfig) -> oculi_core::Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            api_base_url = %config.api_base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating completion client"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(Error::from)?;

        let inner = ClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.inner.config
    }

    /// Converts this client into a [`CompletionService`].
    pub fn into_service(self) -> CompletionService {
        CompletionService::new(self)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> oculi_core::Result<CompletionResponse> {
        let endpoint = self.inner.config.completions_endpoint();
        let payload = ChatCompletionRequest::from_completion(request);

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            endpoint = %endpoint,
            model = %request.model,
            images = request.image_count(),
            "Sending chat completion request"
        );

        let response = self
            .inner
            .http
            .post(&endpoint)
            .bearer_auth(&self.inner.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(Error::from)?
            .error_for_status()
            .map_err(Error::from)?;

        let body: ChatCompletionResponse = response.json().await.map_err(Error::from)?;

        let model = body.model.unwrap_or_else(|| request.model.clone());
        let choice = body.choices.into_iter().next().ok_or_else(|| {
            oculi_core::Error::serialization()
                .with_message("completion response contained no choices")
        })?;
        let content = choice.message.content.ok_or_else(|| {
            oculi_core::Error::serialization()
                .with_message("completion choice contained no message content")
        })?;

        let mut completion = CompletionResponse::new(content, model);
        if let Some(finish_reason) = choice.finish_reason {
            completion = completion.with_finish_reason(finish_reason);
        }
        if let Some(usage) = body.usage {
            completion =
                completion.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(completion)
    }
}
