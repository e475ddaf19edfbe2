#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for completion service operations.
pub const TRACING_TARGET_COMPLETION: &str = "oculi_core::completion";

mod error;

pub mod completion;
pub mod dataset;
pub mod prompt;

// Re-export key types for convenience
pub use error::{BoxedError, Error, ErrorKind, Result};
