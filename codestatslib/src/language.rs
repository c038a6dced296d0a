//! Extension-based language classification.
//!
//! Classification looks only at the file name: the extension (the part of the
//! final path segment starting at its last `.`, dot included) is matched
//! verbatim against [`EXTENSIONS`]. Matching is case-sensitive, so `main.PY`
//! is [`Language::Unknown`] unless the table lists `.PY` too.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Languages recognized by the classifier.
///
/// Variant order is the report order; `Unknown` sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Language {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C Header")]
    CHeader,
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C++ Header")]
    CppHeader,
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "JavaScript")]
    JavaScript,
    #[serde(rename = "TypeScript")]
    TypeScript,
    #[serde(rename = "Go")]
    Go,
    #[serde(rename = "Rust")]
    Rust,
    #[serde(rename = "Unknown")]
    Unknown,
}

/// Extension table, in declaration order.
pub const EXTENSIONS: &[(&str, Language)] = &[
    (".c", Language::C),
    (".h", Language::CHeader),
    (".py", Language::Python),
    (".cpp", Language::Cpp),
    (".hpp", Language::CppHeader),
    (".java", Language::Java),
    (".js", Language::JavaScript),
    (".ts", Language::TypeScript),
    (".go", Language::Go),
    (".rs", Language::Rust),
];

const ALL: &[Language] = &[
    Language::C,
    Language::CHeader,
    Language::Python,
    Language::Cpp,
    Language::CppHeader,
    Language::Java,
    Language::JavaScript,
    Language::TypeScript,
    Language::Go,
    Language::Rust,
    Language::Unknown,
];

impl Language {
    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::CHeader => "C Header",
            Language::Python => "Python",
            Language::Cpp => "C++",
            Language::CppHeader => "C++ Header",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Unknown => "Unknown",
        }
    }

    /// Known languages followed by `Unknown`.
    pub fn all() -> &'static [Language] {
        ALL
    }

    pub fn is_known(self) -> bool {
        self != Language::Unknown
    }

    /// Look up an extension (with its leading dot). Exact, case-sensitive.
    pub fn from_extension(ext: &str) -> Language {
        EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    /// Extensions mapped to this language.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |(_, lang)| *lang == self)
            .map(|(ext, _)| *ext)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of the final path segment, including the dot.
///
/// Leading dots do not start an extension (`.bashrc` has none), and a name
/// without a dot yields `""`.
pub fn extension_of(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return String::new(),
    };
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => name[stem_start + idx..].to_string(),
        None => String::new(),
    }
}

/// Classify a file by its name.
pub fn classify(path: impl AsRef<Path>) -> Language {
    Language::from_extension(&extension_of(path.as_ref()))
}
