//! # codestatslib
//!
//! Per-language line statistics for a directory tree.
//!
//! ## Overview
//!
//! Every file under a root directory is classified by its extension, then
//! counted line by line. Each line is exactly one of:
//!
//! - **Blank**: whitespace only
//! - **Comment**: starts with `//`, `#`, `/*` or `*` after trimming
//! - **Code**: anything else
//!
//! Counts are folded into one entry per language. Files whose extension is
//! not in the language table are skipped, and directories named in the
//! exclusion set (`.git`, `node_modules`, `venv`, `lib`, `bin` by default)
//! are never entered.
//!
//! Comment detection is a prefix heuristic, not a parser. A line like
//! `*ptr = 0;` counts as a comment.
//!
//! ## Example
//!
//! ```rust
//! use codestatslib::{Engine, Language};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.py"), "x = 1\n\n# note\n").unwrap();
//! fs::write(dir.path().join("b.txt"), "not counted\n").unwrap();
//!
//! let mut engine = Engine::new(dir.path(), ["target"]).unwrap();
//! engine.run();
//!
//! let python = engine.table().get(Language::Python);
//! assert_eq!(python.files, 1);
//! assert_eq!(python.lines, 3);
//! assert_eq!(python.blank, 1);
//! assert_eq!(python.comment, 1);
//!
//! let report = engine.report();
//! assert!(report.contains("Python"));
//! assert!(report.contains("Unknown"));
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod language;
pub mod output;
pub mod source;

pub use data::{AggregationTable, Counts, FileCounts};
pub use engine::{CancelToken, Engine, EngineOptions, RunSummary};
pub use error::{CodeStatsError, Warning, WarningKind};
pub use language::{classify, Language};
pub use output::{Report, ReportRow, ReportTotal};
pub use source::ExclusionSet;

/// Result type for codestatslib operations
pub type Result<T> = std::result::Result<T, CodeStatsError>;
