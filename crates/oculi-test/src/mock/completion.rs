//! Mock completion provider for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use oculi_core::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use oculi_core::{Error, Result};

/// Mock completion provider with scripted failure behavior.
///
/// Fails a fixed number of leading calls (or every call) before answering
/// with a canned response, and counts every call it receives. Clones share
/// the call counter, so a handle kept by the test observes calls made
/// through a clone moved into a service.
#[derive(Debug, Clone)]
pub struct MockCompletionProvider {
    content: String,
    failures: u32,
    fail_forever: bool,
    calls: Arc<AtomicU32>,
}

impl MockCompletionProvider {
    /// Creates a provider that always answers with `content`.
    pub fn always(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            failures: 0,
            fail_forever: false,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Creates a provider that fails the first `failures` calls, then
    /// answers with `content`.
    pub fn fail_then_succeed(failures: u32, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            failures,
            fail_forever: false,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Creates a provider that fails every call.
    pub fn always_fail() -> Self {
        Self {
            content: String::new(),
            failures: 0,
            fail_forever: true,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Returns the number of calls received so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_forever || call < self.failures {
            return Err(Error::service_unavailable().with_message("mock completion failure"));
        }

        Ok(CompletionResponse::new(
            self.content.clone(),
            request.model.clone(),
        ))
    }
}
