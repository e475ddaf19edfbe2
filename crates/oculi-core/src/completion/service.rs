//! Completion service with observability.
//!
//! This module provides [`CompletionService`] which wraps completion
//! providers and adds structured logging around every inference call.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use super::{CompletionRequest, CompletionResponse};
use crate::error::Result;
use crate::TRACING_TARGET_COMPLETION;

/// A backend capable of answering completion requests.
///
/// Implementations issue exactly one request per call and perform no retry
/// and no error classification of their own; failure handling belongs to
/// the caller.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Runs a single completion and returns the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// Completion service wrapping any [`CompletionProvider`].
///
/// Adds request-scoped tracing (request id, image count, elapsed time) to
/// every call, leaving retry policy to the caller.
#[derive(Clone)]
pub struct CompletionService {
    provider: Arc<dyn CompletionProvider>,
}

impl fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionService").finish_non_exhaustive()
    }
}

impl CompletionService {
    /// Creates a new completion service from a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: CompletionProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Runs a single completion through the wrapped provider.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET_COMPLETION,
            request_id = %request.request_id,
            model = %request.model,
            images = request.image_count(),
            "Processing completion request"
        );

        let result = self.provider.complete(request).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET_COMPLETION,
                    request_id = %request.request_id,
                    content_len = response.content.len(),
                    total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
                    elapsed_ms = elapsed.as_millis(),
                    "Completion successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_COMPLETION,
                    request_id = %request.request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Completion failed"
                );
            }
        }

        result
    }
}
