//! Prompt construction.
//!
//! Converts a raw [`DatasetRecord`] into the finalized question string sent
//! to the model, plus the ordered list of still-unresolved image locations.
//! Building is a pure function of the record: no I/O, no hidden state.

use serde_json::Value;

use crate::dataset::DatasetRecord;

/// Reasoning instruction appended to English questions.
const ENGLISH_REASONING_SUFFIX: &str = "\nPlease answer this question with reasoning. First output your reasoning process in <think> </think> tags and then output the final answer in <answer> </answer> tags.";

/// Reasoning instruction appended to all non-English questions.
const CHINESE_REASONING_SUFFIX: &str = "\n请用推理来回答这个问题。首先在<think></think>标签中输出推理过程，然后在<answer></answer>标签中输入最终答案。";

/// Finalized question plus its unresolved image locations.
///
/// Built fresh per record and never persisted independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    /// Finalized question string.
    pub question: String,
    /// Ordered image file locations, not yet read or encoded.
    pub image_paths: Vec<String>,
}

/// Builds the finalized question for one dataset record.
///
/// Appends the reasoning instruction in the record's language (exact match
/// against `"English"`; everything else gets the Chinese phrasing), then the
/// significant-figures clause when the record carries a usable value.
pub fn build_prompt(record: &DatasetRecord) -> PromptPayload {
    let mut question = record.question.clone();

    if record.is_english() {
        question.push_str(ENGLISH_REASONING_SUFFIX);
    } else {
        question.push_str(CHINESE_REASONING_SUFFIX);
    }

    if let Some(figures) = significant_figures(&record.sig_figs) {
        if record.is_english() {
            question.push_str(&format!(
                "The final answer should retain {figures} significant figures."
            ));
        } else {
            question.push_str(&format!("最终答案应保留{figures}位有效数字。"));
        }
    }

    PromptPayload {
        question,
        image_paths: record.image_path.clone(),
    }
}

/// Extracts a usable significant-figures count from a lenient JSON value.
///
/// Accepts integer numbers, float numbers (truncated), and numeric strings
/// (trimmed, integer or float). Zero and anything non-numeric yield `None`;
/// malformed values are never an error.
pub fn significant_figures(value: &Value) -> Option<i64> {
    let figures = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    figures.filter(|&n| n != 0)
}
