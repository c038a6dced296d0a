//! Output formatting: turn an aggregation table into a report.
//!
//! [`Report`] is a read-only snapshot of the table with the rows the text
//! report shows; it serializes to JSON as-is and renders to text with
//! [`Report::render`].

pub mod report;

pub use report::{Report, ReportRow, ReportTotal};
