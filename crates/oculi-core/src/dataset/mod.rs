//! Dataset input and result output types.

mod record;
mod results;

pub use record::{DatasetRecord, ResultRecord, ENGLISH_LANGUAGE};
pub use results::ResultSet;
