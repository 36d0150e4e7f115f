//! Batch normalization pipeline.

mod normalizer;
mod report;

pub use normalizer::{normalize, process_item, Config, Normalizer};
pub use report::{item_label, BatchReport, ItemError};
