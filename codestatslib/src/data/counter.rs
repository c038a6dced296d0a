//! Per-file line counting.
//!
//! Comment detection is a line-prefix heuristic, not a lexer: a trimmed line
//! is a comment when it starts with one of [`COMMENT_PREFIXES`]. The lone `*`
//! catches continuation lines of block comments and also matches code such as
//! `*ptr = 0;`. Fixtures rely on that over-matching.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::stats::FileCounts;
use crate::error::CodeStatsError;
use crate::Result;

/// Tokens that mark a trimmed line as a comment.
pub const COMMENT_PREFIXES: &[&str] = &["//", "#", "/*", "*"];

/// Category of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Classify one line of text.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

/// Decode a raw line, dropping byte sequences that are not valid UTF-8.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Split one `read_until(b'\n')` chunk into lines.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. The chunk holds at most one
/// `\n`, at its end, so stripping the terminator and splitting on `\r`
/// yields every line it contains.
fn split_terminators(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let body = body.strip_suffix(b"\r").unwrap_or(body);
    body.split(|b| *b == b'\r')
}

/// Count lines from any buffered reader.
///
/// `\n`, `\r\n` and a lone `\r` are all line terminators. A last line
/// without a terminator still counts.
pub fn count_reader<R: BufRead>(reader: &mut R) -> std::io::Result<FileCounts> {
    let mut counts = FileCounts::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        for line in split_terminators(&buf) {
            counts.lines += 1;
            match classify_line(&decode_lossy(line)) {
                LineKind::Blank => counts.blank += 1,
                LineKind::Comment => counts.comment += 1,
                LineKind::Code => {}
            }
        }
    }

    Ok(counts)
}

/// Count lines in a file on disk.
pub fn count_file(path: impl AsRef<Path>) -> Result<FileCounts> {
    let path = path.as_ref();
    let file_read = |source| CodeStatsError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_read)?;
    let mut reader = BufReader::new(file);
    count_reader(&mut reader).map_err(file_read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{self, Cursor, Read};
    use tempfile::tempdir;

    fn count_str(content: &str) -> FileCounts {
        count_reader(&mut Cursor::new(content.as_bytes())).unwrap()
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t\r\n"), LineKind::Blank);
        assert_eq!(classify_line("// note"), LineKind::Comment);
        assert_eq!(classify_line("   # note"), LineKind::Comment);
        assert_eq!(classify_line("/* block */"), LineKind::Comment);
        assert_eq!(classify_line(" * continued"), LineKind::Comment);
        assert_eq!(classify_line("*/"), LineKind::Comment);
        assert_eq!(classify_line("let x = 1; // trailing"), LineKind::Code);
        assert_eq!(classify_line("x = a / b"), LineKind::Code);
    }

    #[test]
    fn test_pointer_dereference_counts_as_comment() {
        assert_eq!(classify_line("*ptr = 0;"), LineKind::Comment);
    }

    #[test]
    fn test_count_mixed_file() {
        let counts = count_str("*/\n// hi\n\nint x;\n");
        assert_eq!(counts.lines, 4);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comment, 2);
        assert_eq!(counts.code(), 1);
    }

    #[test]
    fn test_count_without_trailing_newline() {
        let counts = count_str("a = 1\n# c\nb = 2");
        assert_eq!(counts.lines, 3);
        assert_eq!(counts.comment, 1);
        assert_eq!(counts.code(), 2);
    }

    #[test]
    fn test_count_empty_input() {
        assert_eq!(count_str(""), FileCounts::new());
    }

    #[test]
    fn test_crlf_line_endings() {
        let counts = count_str("fn main() {}\r\n\r\n// x\r\n");
        assert_eq!(counts.lines, 3);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comment, 1);
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let counts = count_str("int a;\r// c\r\rint b;\r");
        assert_eq!(counts.lines, 4);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comment, 1);
        assert_eq!(counts.code(), 2);
    }

    #[test]
    fn test_mixed_terminators() {
        let counts = count_str("a\r\n\rb\n\r\n# c");
        assert_eq!(counts.lines, 5);
        assert_eq!(counts.blank, 2);
        assert_eq!(counts.comment, 1);
    }

    #[test]
    fn test_split_terminators() {
        let lines: Vec<&[u8]> = split_terminators(b"a\r\rb\r\n").collect();
        assert_eq!(lines, vec![&b"a"[..], &b""[..], &b"b"[..]]);
        assert_eq!(split_terminators(b"\n").count(), 1);
        assert_eq!(split_terminators(b"\r").count(), 1);
        assert_eq!(split_terminators(b"tail").count(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let bytes: &[u8] = b"\xff\xfe\n\xff// x\nok\n";
        let counts = count_reader(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(counts.lines, 3);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comment, 1);
        assert_eq!(counts.code(), 1);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device went away"))
        }
    }

    #[test]
    fn test_read_error_propagates() {
        let mut reader = BufReader::new(FailingReader);
        assert!(count_reader(&mut reader).is_err());
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, "print(1)\n\n# done\n").unwrap();

        let counts = count_file(&path).unwrap();
        assert_eq!(counts.lines, 3);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comment, 1);
    }

    #[test]
    fn test_count_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("gone.rs");

        match count_file(&path) {
            Err(CodeStatsError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected FileRead error, got {other:?}"),
        }
    }
}
