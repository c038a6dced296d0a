//! # codestats
//!
//! A CLI tool for per-language line statistics of a directory tree.
//!
//! ## Overview
//!
//! codestats is built on top of codestatslib. It walks a directory, counts
//! lines, blank lines and comment lines for every file with a known
//! extension, and prints a table per language.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! codestats
//!
//! # Count another directory, also skipping build output
//! codestats ~/src/project --exclude target,dist
//!
//! # Count everything, including .git and friends
//! codestats --no-default-excludes
//!
//! # JSON output, four counting threads
//! codestats . --output json --jobs 4
//! ```

use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use codestatslib::{Engine, EngineOptions, Report, Warning};
use serde::Serialize;
use tracing::Level;

/// JSON document printed with `--output json`
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: Report,
    warnings: &'a [Warning],
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("codestats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count lines, blank lines and comments per language in a directory tree")
        .arg(
            Arg::new("dir")
                .help("Root directory to scan (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Additional directory names to exclude (can be specified multiple times)"),
        )
        .arg(
            Arg::new("no-default-excludes")
                .long("no-default-excludes")
                .action(ArgAction::SetTrue)
                .help("Do not exclude .git, node_modules, venv, lib and bin"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .help("Threads used for counting (0 = all cores)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help("Log more (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
}

/// Pick the log level from -v/-q
fn log_level(matches: &ArgMatches) -> Level {
    if matches.get_flag("quiet") {
        return Level::ERROR;
    }
    match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build engine options from matches
fn build_options(matches: &ArgMatches) -> EngineOptions {
    let mut options = EngineOptions::new();
    if matches.get_flag("no-default-excludes") {
        options = options.no_default_exclusions();
    }
    if let Some(names) = matches.get_many::<String>("exclude") {
        options = options.exclude_many(names.cloned());
    }
    let jobs = matches.get_one::<usize>("jobs").copied().unwrap_or(1);
    options.jobs(jobs)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let dir = matches
        .get_one::<String>("dir")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let json = matches
        .get_one::<String>("output")
        .is_some_and(|s| s == "json");

    let mut engine = Engine::with_options(dir, build_options(matches))?;
    engine.run();

    if json {
        let output = JsonOutput {
            report: engine.report_data(),
            warnings: engine.warnings(),
        };
        let mut text = serde_json::to_string_pretty(&output)?;
        text.push('\n');
        return Ok(text);
    }

    Ok(engine.report_data().render(true))
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    if matches.get_flag("no-color") {
        console::set_colors_enabled(false);
    }
    init_logging(log_level(&matches));

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
