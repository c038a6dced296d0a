//! Core data structures for line statistics.
//!
//! Each line of a counted file falls into exactly one category:
//!
//! - **blank**: empty after trimming whitespace
//! - **comment**: starts with a comment token (`//`, `#`, `/*`, `*`)
//! - **code**: everything else
//!
//! Only `blank` and `comment` are stored; code is the remainder of `lines`.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::language::Language;

/// Line counts for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileCounts {
    pub lines: u64,
    pub blank: u64,
    pub comment: u64,
}

impl FileCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that are neither blank nor comments.
    pub fn code(&self) -> u64 {
        self.lines - self.blank - self.comment
    }
}

/// Aggregated counts for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Number of files successfully counted
    pub files: u64,
    /// Total line count
    pub lines: u64,
    /// Blank lines
    pub blank: u64,
    /// Comment lines
    pub comment: u64,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that are neither blank nor comments.
    pub fn code(&self) -> u64 {
        self.lines - self.blank - self.comment
    }

    /// Fold one file into these counts.
    pub fn add_file(&mut self, file: FileCounts) {
        self.files += 1;
        self.lines += file.lines;
        self.blank += file.blank;
        self.comment += file.comment;
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }
}

impl Add for Counts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            lines: self.lines + other.lines,
            blank: self.blank + other.blank,
            comment: self.comment + other.comment,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.lines += other.lines;
        self.blank += other.blank;
        self.comment += other.comment;
    }
}

/// Per-language counts.
///
/// Holds an entry for every language, `Unknown` included, from construction
/// on; entries are only ever updated in place. Iteration follows
/// [`Language`] order, so `Unknown` comes last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregationTable {
    entries: BTreeMap<Language, Counts>,
}

impl AggregationTable {
    /// Create a table with a zero entry per language.
    pub fn new() -> Self {
        Self {
            entries: Language::all()
                .iter()
                .map(|lang| (*lang, Counts::new()))
                .collect(),
        }
    }

    pub fn get(&self, language: Language) -> Counts {
        self.entries.get(&language).copied().unwrap_or_default()
    }

    /// Record a successfully counted file under `language`.
    pub fn record(&mut self, language: Language, file: FileCounts) {
        self.entries.entry(language).or_default().add_file(file);
    }

    /// Add every entry of `other` into this table.
    pub fn merge(&mut self, other: &AggregationTable) {
        for (lang, counts) in &other.entries {
            *self.entries.entry(*lang).or_default() += *counts;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, Counts)> + '_ {
        self.entries.iter().map(|(lang, counts)| (*lang, *counts))
    }

    /// Sum of all entries.
    pub fn total(&self) -> Counts {
        self.entries
            .values()
            .fold(Counts::new(), |acc, counts| acc + *counts)
    }

    /// Zero every entry, keeping the keys.
    pub fn reset(&mut self) {
        for counts in self.entries.values_mut() {
            *counts = Counts::new();
        }
    }
}

impl Default for AggregationTable {
    fn default() -> Self {
        Self::new()
    }
}
