//! Directory traversal with name-based pruning.
//!
//! Excluded directories are removed from the walk before they are entered,
//! so nothing beneath them is ever listed. Matching is on the bare directory
//! name only; the root itself is never pruned.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::engine::CancelToken;
use crate::error::Warning;

/// Directory names skipped unless the caller opts out.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[".git", "node_modules", "venv", "lib", "bin"];

/// Directory names pruned from traversal.
///
/// Keeps insertion order for display and ignores duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    names: Vec<String>,
}

impl ExclusionSet {
    /// An empty set; nothing is pruned.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Add a directory name.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Add a directory name, builder style.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.insert(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        DEFAULT_EXCLUSIONS.iter().copied().collect()
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

/// Files found under a root, plus any directories that could not be listed.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
    pub cancelled: bool,
}

fn is_pruned(entry: &DirEntry, exclusions: &ExclusionSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let pruned = exclusions.contains(&name);
    if pruned {
        tracing::debug!(path = %entry.path().display(), "pruning excluded directory");
    }
    pruned
}

/// Whether a walk entry is a regular file, following file symlinks.
///
/// Broken symlinks are kept so the failed open surfaces as a warning.
/// Symlinks to directories are dropped; they are never descended into.
fn is_file_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return match std::fs::metadata(entry.path()) {
            Ok(meta) => meta.is_file(),
            Err(_) => true,
        };
    }
    false
}

/// Walk `root` depth-first in file-name order and collect candidate files.
///
/// Unlistable directories become warnings; the walk continues with their
/// siblings. Stops early once `cancel` fires.
pub fn discover_files(root: &Path, exclusions: &ExclusionSet, cancel: &CancelToken) -> Discovery {
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e, exclusions));

    for entry in walker {
        if cancel.is_cancelled() {
            discovery.cancelled = true;
            break;
        }

        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let warning = Warning::inaccessible_directory(&path, &err);
                tracing::warn!(path = %path.display(), error = %err, "skipping directory");
                discovery.warnings.push(warning);
                continue;
            }
        };

        if is_file_candidate(&entry) {
            discovery.files.push(entry.into_path());
        }
    }

    discovery
}
