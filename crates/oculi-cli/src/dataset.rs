//! Dataset loading.

use std::path::Path;

use anyhow::Context;
use oculi_core::dataset::DatasetRecord;

use crate::TRACING_TARGET_CONFIG;

/// Reads the full input dataset into memory.
///
/// A missing or unparsable input file is fatal: no partial result set
/// exists yet to protect, so the error propagates and terminates the run.
pub fn load(path: &Path) -> anyhow::Result<Vec<DatasetRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;

    let records: Vec<DatasetRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse dataset {}", path.display()))?;

    tracing::info!(
        target: TRACING_TARGET_CONFIG,
        records = records.len(),
        path = %path.display(),
        "Loaded dataset"
    );

    Ok(records)
}
