//! Reporting utilities: terminal summaries and prediction tables.

pub mod format;

pub use format::*;
