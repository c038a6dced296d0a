//! Integration tests for codestats CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn run_codestats(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_codestats"))
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn create_project(root: &Path) {
    write(root, "a.py", "x = 1\n\n# note\n");
    write(root, "b.txt", "1\n2\n3\n4\n5\n");
    write(root, "src/weird.c", "*/\n// hi\n\nint x;\n");
    write(root, ".git/config.py", "a\nb\n");
    write(root, "build/out.c", "int y;\n");
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_codestats(&["--help"]);

    assert!(success);
    assert!(stdout.contains("codestats"));
    assert!(stdout.contains("--exclude"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--jobs"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_codestats(&["--version"]);

    assert!(success);
    assert!(stdout.contains("codestats"));
}

#[test]
fn test_text_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_codestats(&[dir, "--no-color"]);

    assert!(success);
    assert!(stdout.contains("=== Code Statistics Report ==="));
    assert!(stdout.contains("Excluded Dirs: .git, node_modules, venv, lib, bin"));
    assert!(stdout.contains("Python          1      3        1        1"));
    assert!(stdout.contains("C               2      5        1        2"));
    assert!(stdout.contains("Unknown         0      0        0        0"));
    assert!(stdout.contains("Total:          3      8        -        -"));
    assert!(!stdout.contains("Rust"));
}

#[test]
fn test_exclude_flag() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_codestats(&[dir, "--no-color", "--exclude", "build,dist"]);

    assert!(success);
    assert!(stdout.contains("Excluded Dirs: .git, node_modules, venv, lib, bin, build, dist"));
    assert!(stdout.contains("C               1      4        1        2"));
}

#[test]
fn test_no_default_excludes() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_codestats(&[dir, "--no-color", "--no-default-excludes"]);

    assert!(success);
    assert!(stdout.contains("Excluded Dirs: (none)"));
    assert!(stdout.contains("Python          2      5        1        1"));
}

#[test]
fn test_json_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_codestats(&[dir, "--output", "json", "--jobs", "2"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["total"]["files"], 3);
    assert_eq!(parsed["total"]["lines"], 8);
    assert_eq!(parsed["rows"][0]["language"], "C");
    assert_eq!(parsed["rows"][0]["comment"], 2);
    assert_eq!(parsed["rows"][0]["code"], 2);
    assert_eq!(parsed["rows"][1]["language"], "Python");
    assert_eq!(parsed["rows"][2]["language"], "Unknown");
    assert!(parsed["warnings"].as_array().unwrap().is_empty());
    assert!(parsed["root"].as_str().is_some());
}

#[test]
fn test_invalid_path() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nonexistent");

    let (stdout, stderr, success) = run_codestats(&[missing.to_str().unwrap()]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("invalid root"));
    assert!(stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_a_warning() {
    let temp = tempdir().unwrap();
    write(temp.path(), "ok.rs", "fn ok() {}\n");
    std::os::unix::fs::symlink(temp.path().join("gone.rs"), temp.path().join("broken.rs")).unwrap();
    let dir = temp.path().to_str().unwrap();

    let (stdout, stderr, success) = run_codestats(&[dir, "--no-color"]);

    assert!(success);
    assert!(stdout.contains("Rust            1      1        0        0"));
    assert!(stderr.contains("broken.rs"));
}
