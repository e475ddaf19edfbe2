#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod runner;

pub use runner::{
    InferenceRunner, RunSummary, MAX_ATTEMPTS, MAX_COMPLETION_TOKENS, RETRY_DELAY,
    RETRY_EXHAUSTED_PREDICTION, TRACING_TARGET,
};
