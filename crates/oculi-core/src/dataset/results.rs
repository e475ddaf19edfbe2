//! Accumulating result set.

use serde::{Deserialize, Serialize};

use super::ResultRecord;
use crate::error::Result;

/// Ordered sequence of result records, one per processed dataset record.
///
/// Owned exclusively by the driver loop: exactly one record is appended per
/// iteration, in input order, and the full set is serialized after every
/// append so that a crash loses at most the in-flight record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one result record.
    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// Returns the number of accumulated records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records have been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the accumulated records.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    /// Serializes the full set as pretty-printed JSON.
    ///
    /// Non-ASCII characters are left unescaped.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records).map_err(|err| {
            crate::Error::serialization()
                .with_message("failed to serialize result set")
                .with_source(err)
        })
    }
}
