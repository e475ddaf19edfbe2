//! Dataset record types.
//!
//! A [`DatasetRecord`] is one evaluation item read from the input file; a
//! [`ResultRecord`] is the corresponding output unit. Metadata fields are
//! opaque passthrough values: whatever JSON the input carries for them is
//! written to the output unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Language value that selects the English instruction phrasing.
pub const ENGLISH_LANGUAGE: &str = "English";

/// One evaluation item from the input dataset.
///
/// Only `index` and `question` are required; everything else tolerates
/// being absent. `sig_figs` in particular may be absent, null, numeric, or
/// a free-form string and must never be fatal to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Unique identifier of this item within the dataset.
    pub index: i64,
    /// Raw question text.
    pub question: String,
    /// Ordered image file locations, possibly empty.
    #[serde(default)]
    pub image_path: Vec<String>,
    /// Question language; compared verbatim against `"English"`.
    #[serde(default)]
    pub language: String,
    /// Optional significant-figures hint; interpreted leniently.
    #[serde(default)]
    pub sig_figs: Value,
    /// Opaque passthrough metadata.
    #[serde(default)]
    pub subject: Value,
    /// Opaque passthrough metadata.
    #[serde(default)]
    pub img_category: Value,
    /// Opaque passthrough metadata.
    #[serde(default)]
    pub vision_relevance: Value,
    /// Opaque passthrough metadata.
    #[serde(default)]
    pub level: Value,
    /// Opaque passthrough metadata.
    #[serde(default)]
    pub caption: Value,
}

impl DatasetRecord {
    /// Returns true if this record selects the English instruction branch.
    ///
    /// Comparison is exact string equality; no normalization is performed.
    pub fn is_english(&self) -> bool {
        self.language == ENGLISH_LANGUAGE
    }
}

/// One output unit: the input record's metadata plus the finalized question
/// and the model's prediction.
///
/// Field order matches the serialized output layout. Records are
/// append-only: once written they are never revised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identifier carried over from the input record.
    pub index: i64,
    /// Finalized question string, after prompt building.
    pub question: String,
    /// Passthrough metadata.
    pub subject: Value,
    /// Passthrough metadata.
    pub img_category: Value,
    /// Passthrough metadata.
    pub vision_relevance: Value,
    /// Passthrough language value.
    pub language: String,
    /// Passthrough metadata.
    pub level: Value,
    /// Passthrough significant-figures value.
    pub sig_figs: Value,
    /// Passthrough metadata.
    pub caption: Value,
    /// Model answer text, or the exhausted-retries sentinel.
    pub prediction: String,
}

impl ResultRecord {
    /// Builds a result record from an input record, the finalized question,
    /// and the prediction text.
    pub fn new(
        record: &DatasetRecord,
        question: impl Into<String>,
        prediction: impl Into<String>,
    ) -> Self {
        Self {
            index: record.index,
            question: question.into(),
            subject: record.subject.clone(),
            img_category: record.img_category.clone(),
            vision_relevance: record.vision_relevance.clone(),
            language: record.language.clone(),
            level: record.level.clone(),
            sig_figs: record.sig_figs.clone(),
            caption: record.caption.clone(),
            prediction: prediction.into(),
        }
    }
}
