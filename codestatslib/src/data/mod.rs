//! Data collection: count lines and aggregate them per language.
//!
//! - **Counting**: stream a file line by line into blank/comment/code
//! - **Statistics**: per-file counts and the per-language aggregation table

pub mod counter;
pub mod stats;

pub use counter::{classify_line, count_file, count_reader, LineKind, COMMENT_PREFIXES};
pub use stats::{AggregationTable, Counts, FileCounts};
