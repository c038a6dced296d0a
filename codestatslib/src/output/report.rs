//! Report data and text rendering.
//!
//! A [`Report`] is a snapshot taken from an aggregation table; building or
//! rendering one never touches the table. Rows keep table order, skip
//! languages with no files, and always include `Unknown`. The total row sums
//! files and lines only; blank and comment totals are shown as `-`.

use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;

use crate::data::stats::{AggregationTable, Counts};
use crate::language::Language;
use crate::source::walk::ExclusionSet;

const TITLE: &str = "=== Code Statistics Report ===";
const FOOTER: &str = "=== End of Report ===";
const SEPARATOR_WIDTH: usize = 55;
const LANGUAGE_WIDTH: usize = 15;
const FILES_WIDTH: usize = 6;
const CELL_WIDTH: usize = 8;

/// One language row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub language: Language,
    pub files: u64,
    pub lines: u64,
    pub blank: u64,
    pub comment: u64,
    /// Lines that are neither blank nor comments
    pub code: u64,
}

impl ReportRow {
    fn new(language: Language, counts: Counts) -> Self {
        Self {
            language,
            files: counts.files,
            lines: counts.lines,
            blank: counts.blank,
            comment: counts.comment,
            code: counts.code(),
        }
    }
}

/// Totals over the shown rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotal {
    pub files: u64,
    pub lines: u64,
}

/// Report-ready statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub root: PathBuf,
    pub excluded: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub total: ReportTotal,
}

impl Report {
    pub fn new(root: &Path, exclusions: &ExclusionSet, table: &AggregationTable) -> Self {
        let rows: Vec<ReportRow> = table
            .iter()
            .filter(|(lang, counts)| !lang.is_known() || !counts.is_empty())
            .map(|(lang, counts)| ReportRow::new(lang, counts))
            .collect();

        let total = rows.iter().fold(ReportTotal::default(), |acc, row| ReportTotal {
            files: acc.files + row.files,
            lines: acc.lines + row.lines,
        });

        Self {
            root: root.to_path_buf(),
            excluded: exclusions.iter().map(str::to_string).collect(),
            rows,
            total,
        }
    }

    pub fn row(&self, language: Language) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.language == language)
    }

    /// Render as text. `styled` adds terminal colors where the terminal
    /// supports them.
    pub fn render(&self, styled: bool) -> String {
        let paint = |style: Style, text: &str| -> String {
            if styled {
                style.apply_to(text).to_string()
            } else {
                text.to_string()
            }
        };
        let title = Style::new().blue().bold();
        let header = Style::new().green();
        let total = Style::new().yellow();

        let separator = "-".repeat(SEPARATOR_WIDTH);
        let excluded = if self.excluded.is_empty() {
            "(none)".to_string()
        } else {
            self.excluded.join(", ")
        };

        let mut lines = vec![
            paint(title.clone(), TITLE),
            format!("Root Directory: {}", self.root.display()),
            format!("Excluded Dirs: {excluded}"),
            String::new(),
            paint(
                header,
                &format_row("Language", "Files", "Lines", "Blank", "Comment"),
            ),
            separator.clone(),
        ];

        for row in &self.rows {
            lines.push(format_row(
                row.language.name(),
                &row.files.to_string(),
                &row.lines.to_string(),
                &row.blank.to_string(),
                &row.comment.to_string(),
            ));
        }

        lines.push(separator);
        lines.push(paint(
            total,
            &format_row(
                "Total:",
                &self.total.files.to_string(),
                &self.total.lines.to_string(),
                "-",
                "-",
            ),
        ));
        lines.push(String::new());
        lines.push(paint(title, FOOTER));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn format_row(label: &str, files: &str, lines: &str, blank: &str, comment: &str) -> String {
    format!(
        "{:<lw$} {:<fw$} {:<cw$} {:<cw$} {:<cw$}",
        label,
        files,
        lines,
        blank,
        comment,
        lw = LANGUAGE_WIDTH,
        fw = FILES_WIDTH,
        cw = CELL_WIDTH,
    )
    .trim_end()
    .to_string()
}
