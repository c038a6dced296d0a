//! The statistics engine: walk, classify, count, fold.
//!
//! An [`Engine`] owns one [`AggregationTable`]. [`Engine::run`] fills it and
//! [`Engine::report`] renders it without touching it, so callers can inspect
//! the raw table through [`Engine::table`] between the two.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::data::counter::count_file;
use crate::data::stats::{AggregationTable, FileCounts};
use crate::error::{CodeStatsError, Warning};
use crate::language::{classify, Language};
use crate::output::report::Report;
use crate::source::walk::{discover_files, ExclusionSet};
use crate::Result;

/// Shared flag that stops a run from taking on more files.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Options for an engine run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory names pruned from the walk
    pub exclusions: ExclusionSet,
    /// Counting threads: 1 runs inline, 0 uses every core
    pub jobs: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            jobs: 1,
        }
    }
}

impl EngineOptions {
    /// Default exclusions, sequential counting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude another directory name.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclusions.insert(name);
        self
    }

    /// Exclude several directory names.
    pub fn exclude_many<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(names);
        self
    }

    /// Drop the default exclusions; only names added afterwards apply.
    pub fn no_default_exclusions(mut self) -> Self {
        self.exclusions = ExclusionSet::empty();
        self
    }

    /// Set the number of counting threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Outcome of [`Engine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files classified and fully counted
    pub files_counted: u64,
    /// Files with an unknown extension
    pub files_skipped: u64,
    /// Warnings recorded during the run
    pub warnings: usize,
    /// Whether the run stopped early
    pub cancelled: bool,
}

/// Per-language statistics for one directory tree.
#[derive(Debug)]
pub struct Engine {
    root: PathBuf,
    options: EngineOptions,
    table: AggregationTable,
    warnings: Vec<Warning>,
    cancel: CancelToken,
}

impl Engine {
    /// Create an engine over `root` with the default exclusions plus
    /// `additional_exclusions`.
    ///
    /// Fails with [`CodeStatsError::InvalidRoot`] when `root` is missing or
    /// not a directory.
    pub fn new<I, S>(root: impl AsRef<Path>, additional_exclusions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(root, EngineOptions::new().exclude_many(additional_exclusions))
    }

    pub fn with_options(root: impl AsRef<Path>, options: EngineOptions) -> Result<Self> {
        let root = resolve_root(root.as_ref())?;
        Ok(Self {
            root,
            options,
            table: AggregationTable::new(),
            warnings: Vec::new(),
            cancel: CancelToken::new(),
        })
    }

    /// Absolute root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.options.exclusions
    }

    /// Raw per-language counts.
    pub fn table(&self) -> &AggregationTable {
        &self.table
    }

    /// Warnings from the last run, ordered by path.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Token that stops the current or next run.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Walk the tree and populate the table.
    ///
    /// State from a previous run is cleared first, so repeated calls give the
    /// same result. A cancelled token is honored, then reset once the run
    /// returns.
    pub fn run(&mut self) -> RunSummary {
        self.run_with(&|path: &Path| count_file(path))
    }

    fn run_with<F>(&mut self, count: &F) -> RunSummary
    where
        F: Fn(&Path) -> Result<FileCounts> + Sync,
    {
        self.table.reset();
        self.warnings.clear();

        let discovery = discover_files(&self.root, &self.options.exclusions, &self.cancel);
        self.warnings.extend(discovery.warnings);

        let mut files_skipped = 0;
        let mut candidates = Vec::with_capacity(discovery.files.len());
        for path in discovery.files {
            match classify(&path) {
                Language::Unknown => {
                    tracing::debug!(path = %path.display(), "skipping unknown file type");
                    files_skipped += 1;
                }
                lang => candidates.push((path, lang)),
            }
        }

        let partial = if self.options.jobs == 1 {
            count_sequential(&candidates, &self.cancel, count)
        } else {
            match count_parallel(&candidates, self.options.jobs, &self.cancel, count) {
                Ok(partial) => partial,
                Err(err) => {
                    tracing::warn!(error = %err, "falling back to sequential counting");
                    count_sequential(&candidates, &self.cancel, count)
                }
            }
        };

        self.table.merge(&partial.table);
        self.warnings.extend(partial.warnings);
        self.warnings.sort_by(|a, b| a.path.cmp(&b.path));

        let summary = RunSummary {
            files_counted: self.table.total().files,
            files_skipped,
            warnings: self.warnings.len(),
            cancelled: discovery.cancelled || self.cancel.is_cancelled(),
        };
        self.cancel.reset();

        tracing::info!(
            root = %self.root.display(),
            files = summary.files_counted,
            skipped = summary.files_skipped,
            warnings = summary.warnings,
            cancelled = summary.cancelled,
            "code statistics run finished"
        );

        summary
    }

    /// Structured report of the current table.
    pub fn report_data(&self) -> Report {
        Report::new(&self.root, &self.options.exclusions, &self.table)
    }

    /// Plain-text report of the current table.
    pub fn report(&self) -> String {
        self.report_data().render(false)
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let invalid = |reason: String| CodeStatsError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let absolute = std::path::absolute(root).map_err(|e| invalid(e.to_string()))?;
    let meta = std::fs::metadata(&absolute).map_err(|e| invalid(e.to_string()))?;
    if !meta.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    Ok(absolute)
}

/// Counts gathered by one worker before merging.
#[derive(Debug, Default)]
struct Partial {
    table: AggregationTable,
    warnings: Vec<Warning>,
}

impl Partial {
    fn count<F>(mut self, path: &Path, language: Language, cancel: &CancelToken, count: &F) -> Self
    where
        F: Fn(&Path) -> Result<FileCounts>,
    {
        if cancel.is_cancelled() {
            return self;
        }
        match count(path) {
            Ok(counts) => self.table.record(language, counts),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                self.warnings.push(Warning::unreadable_file(path, &err));
            }
        }
        self
    }

    fn merge(mut self, other: Partial) -> Self {
        self.table.merge(&other.table);
        self.warnings.extend(other.warnings);
        self
    }
}

fn count_sequential<F>(candidates: &[(PathBuf, Language)], cancel: &CancelToken, count: &F) -> Partial
where
    F: Fn(&Path) -> Result<FileCounts>,
{
    candidates
        .iter()
        .fold(Partial::default(), |acc, (path, lang)| {
            acc.count(path, *lang, cancel, count)
        })
}

fn count_parallel<F>(
    candidates: &[(PathBuf, Language)],
    jobs: usize,
    cancel: &CancelToken,
    count: &F,
) -> Result<Partial>
where
    F: Fn(&Path) -> Result<FileCounts> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| CodeStatsError::WorkerPool(e.to_string()))?;

    Ok(pool.install(|| {
        candidates
            .par_iter()
            .fold(Partial::default, |acc, (path, lang)| {
                acc.count(path, *lang, cancel, count)
            })
            .reduce(Partial::default, Partial::merge)
    }))
}
