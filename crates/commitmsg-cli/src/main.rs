//! # commitmsg-cli
//!
//! Command-line interface for the commitmsg parser.
//!
//! Reads a commit message from an argument, a file (for example the
//! `.git/COMMIT_EDITMSG` path a `commit-msg` hook receives) or stdin, parses
//! it and prints the syntax tree. Exits with status 1 when the message does
//! not parse.

mod config;
mod errors;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use commitmsg::{ParseOptions, parse_with};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{Level, debug};

use config::{Config, OutputFormat};
use errors::enhance_parse_error;

#[derive(Parser)]
#[command(name = "commitmsg")]
#[command(about = "Parse conventional commit messages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message text; read from --file or stdin when omitted
    #[arg(value_name = "MESSAGE")]
    message: Option<String>,

    /// Read the message from a file ("-" for stdin)
    #[arg(short, long, value_name = "PATH", conflicts_with = "message")]
    file: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Also parse body and BREAKING CHANGE footer paragraphs
    #[arg(long)]
    full: bool,

    #[arg(long)]
    no_color: bool,

    /// Log parser activity to stderr (-vv for backtracking detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Use this config file instead of searching for .commitmsgrc
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write a default .commitmsgrc in the current directory")]
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init { force }) = cli.command {
        return init_config(force);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("{} Failed to load config: {:#}", "⚠".yellow().bold(), e);
            Config::default()
        }),
    };
    config.merge_cli_args(cli.format, cli.full, cli.no_color, cli.verbose);

    init_logging(&config, cli.verbose);

    if !config.colored {
        colored::control::set_override(false);
    }

    let file_label = cli.file.as_ref().map(|p| p.display().to_string());
    let message = read_message(cli.message, cli.file)?;
    debug!(bytes = message.len(), "read commit message");

    let options = ParseOptions {
        full_grammar: config.full_grammar,
    };

    let tree = match parse_with(&message, options) {
        Ok(tree) => tree,
        Err(parse_error) => {
            enhance_parse_error(&parse_error, &message, file_label).display();
            std::process::exit(1);
        }
    };

    print!("{}", output::render(&tree, config.format)?);
    Ok(())
}

fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 if config.verbose => Level::DEBUG,
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_message(message: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(message) = message {
        return Ok(message);
    }

    let raw = match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read message from {:?}", path))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    Ok(strip_trailing_newline(raw))
}

/// Drops the one line terminator editors and git append to message files.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') {
        text.truncate(text.len() - 1);
    }
    text
}

fn init_config(force: bool) -> Result<()> {
    let path = Config::default_path();
    Config::create_default(&path, force)?;
    println!("{} Created config: {}", "✓".green().bold(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_newline() {
        assert_eq!(strip_trailing_newline("fix: a.\n".to_string()), "fix: a.");
        assert_eq!(strip_trailing_newline("fix: a.\r\n".to_string()), "fix: a.");
        assert_eq!(strip_trailing_newline("fix: a.\n\n".to_string()), "fix: a.\n");
        assert_eq!(strip_trailing_newline("fix: a.".to_string()), "fix: a.");
    }

    #[test]
    fn test_message_argument_wins() {
        let message = read_message(Some("feat: x.\n".to_string()), None).unwrap();
        assert_eq!(message, "feat: x.\n");
    }

    #[test]
    fn test_read_message_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, "fix(cli): read files.\n").unwrap();
        let message = read_message(None, Some(path)).unwrap();
        assert_eq!(message, "fix(cli): read files.");
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
