//! Source discovery: find files to count.
//!
//! Walks a directory tree depth-first, pruning directories whose bare name is
//! in the [`ExclusionSet`]. Directories that cannot be listed are reported as
//! warnings instead of failing the walk.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatslib::source::{discover_files, ExclusionSet};
//! use codestatslib::CancelToken;
//!
//! let exclusions = ExclusionSet::default().with("target");
//! let discovery = discover_files(root, &exclusions, &CancelToken::new());
//! ```

pub mod walk;

pub use walk::{discover_files, Discovery, ExclusionSet, DEFAULT_EXCLUSIONS};
