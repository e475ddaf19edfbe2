#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod wire;

pub use crate::client::{OpenAiClient, TRACING_TARGET};
pub use crate::config::OpenAiConfig;
pub use crate::error::{Error, Result};
