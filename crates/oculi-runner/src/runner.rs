//! The retry-and-persist driver loop.
//!
//! Records are processed strictly sequentially. Every record moves through
//! `PENDING -> ATTEMPTING -> {SUCCEEDED | FAILED_EXHAUSTED}`; both terminal
//! states produce exactly one result record, and the full result set is
//! rewritten to the output path after every terminal state so that a crash
//! loses at most the in-flight record.

use std::path::{Path, PathBuf};
use std::time::Duration;

use oculi_core::completion::{CompletionRequest, CompletionResponse, CompletionService, ImageInput};
use oculi_core::dataset::{DatasetRecord, ResultRecord, ResultSet};
use oculi_core::prompt::{build_prompt, PromptPayload};
use oculi_core::Result;

/// Tracing target for driver loop operations.
pub const TRACING_TARGET: &str = "oculi_runner::driver";

/// Maximum completion attempts per record.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fixed backoff between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Output token bound, effectively unbounded for this workload.
pub const MAX_COMPLETION_TOKENS: u32 = 128_000;

/// Prediction recorded when all attempts for a record are exhausted.
pub const RETRY_EXHAUSTED_PREDICTION: &str = "ERROR: Max retries reached.";

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of records processed (successes and exhausted failures).
    pub processed: usize,
    /// Number of records that exhausted their attempt budget.
    pub failed: usize,
}

/// Sequential batch inference driver.
///
/// Owns the result set exclusively: one record is appended per processed
/// dataset record, in input order, and the set is flushed in full after
/// every append.
#[derive(Debug, Clone)]
pub struct InferenceRunner {
    service: CompletionService,
    model: String,
    output_path: PathBuf,
}

impl InferenceRunner {
    /// Creates a new runner writing results to `output_path`.
    pub fn new(
        service: CompletionService,
        model: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            model: model.into(),
            output_path: output_path.into(),
        }
    }

    /// Returns the output path this runner writes to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Processes the whole dataset, one record at a time.
    ///
    /// Per-record failures are contained: an exhausted record is written
    /// with the sentinel prediction and the loop advances. Only output
    /// persistence failures abort the run.
    pub async fn run(&self, dataset: &[DatasetRecord]) -> Result<RunSummary> {
        let total = dataset.len();
        let mut results = ResultSet::new();
        let mut failed = 0usize;

        tracing::info!(
            target: TRACING_TARGET,
            total,
            model = %self.model,
            output = %self.output_path.display(),
            "Starting inference run"
        );

        for (position, record) in dataset.iter().enumerate() {
            let payload = build_prompt(record);

            tracing::info!(
                target: TRACING_TARGET,
                index = record.index,
                position = position + 1,
                total,
                images = payload.image_paths.len(),
                "Processing record"
            );

            let prediction = match self.complete_with_retries(record, &payload).await {
                Some(response) => response.content,
                None => {
                    failed += 1;
                    RETRY_EXHAUSTED_PREDICTION.to_string()
                }
            };

            results.push(ResultRecord::new(record, payload.question, prediction));
            self.persist(&results).await?;
        }

        tracing::info!(
            target: TRACING_TARGET,
            processed = results.len(),
            failed,
            "Inference run finished"
        );

        Ok(RunSummary {
            processed: results.len(),
            failed,
        })
    }

    /// Runs the bounded retry loop for one record.
    ///
    /// Every error raised inside an attempt, image read failures included,
    /// counts against the same attempt budget. Returns `None` once the
    /// budget is exhausted.
    async fn complete_with_retries(
        &self,
        record: &DatasetRecord,
        payload: &PromptPayload,
    ) -> Option<CompletionResponse> {
        let mut attempt = 0;

        while attempt < MAX_ATTEMPTS {
            match self.attempt(payload).await {
                Ok(response) => return Some(response),
                Err(error) => {
                    attempt += 1;
                    tracing::error!(
                        target: TRACING_TARGET,
                        index = record.index,
                        attempt,
                        error = %error,
                        "Attempt failed"
                    );

                    if attempt < MAX_ATTEMPTS {
                        tracing::info!(
                            target: TRACING_TARGET,
                            index = record.index,
                            delay_secs = RETRY_DELAY.as_secs(),
                            "Waiting before retrying"
                        );
                        tokio::time::sleep(RETRY_DELAY).await;
                    } else {
                        tracing::error!(
                            target: TRACING_TARGET,
                            index = record.index,
                            "Max retries reached, recording failure"
                        );
                    }
                }
            }
        }

        None
    }

    /// Performs one attempt: encode the record's images, then run one
    /// completion. Images are re-read and re-encoded on every attempt and
    /// dropped when the attempt completes.
    async fn attempt(&self, payload: &PromptPayload) -> Result<CompletionResponse> {
        let mut images = Vec::with_capacity(payload.image_paths.len());
        for path in &payload.image_paths {
            images.push(ImageInput::from_path(path).await?);
        }

        let request = CompletionRequest::new(self.model.clone(), payload.question.clone())
            .with_images(images)
            .with_max_tokens(MAX_COMPLETION_TOKENS);

        self.service.complete(&request).await
    }

    /// Rewrites the full result set to the output path.
    async fn persist(&self, results: &ResultSet) -> Result<()> {
        let json = results.to_json_pretty()?;
        tokio::fs::write(&self.output_path, json).await.map_err(|err| {
            oculi_core::Error::io()
                .with_message(format!(
                    "failed to write results to {}",
                    self.output_path.display()
                ))
                .with_source(err)
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            records = results.len(),
            output = %self.output_path.display(),
            "Flushed result set"
        );

        Ok(())
    }
}
