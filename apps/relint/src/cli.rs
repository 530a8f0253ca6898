//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "relint",
    version,
    about = "Run pylint and re-classify its messages by code",
    long_about = "Relint runs pylint on each file, parses its messages, and assigns every message code a severity (error, warning, advice, or disabled) from regex rules.\n\nConfiguration precedence: CLI > relint.toml > defaults.",
    after_help = "Examples:\n  relint lint 'src/**/*.py'\n  relint lint app.py --output json\n  relint lint 'pkg/*.py' --prefix /opt/pylint --option=--disable=C0111",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(
        long,
        short,
        global = true,
        action = clap::ArgAction::SetTrue,
        help = "Enable debug logging (overridden by RELINT_LOG)"
    )]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current relint version."
    )]
    Version,
    /// Lint Python files with pylint
    #[command(
        about = "Run pylint and report re-classified messages",
        long_about = "Run pylint on every file matched by the given glob patterns. Messages at error severity make the command exit with status 1.",
        after_help = "Examples:\n  relint lint '**/*.py'\n  relint lint a.py b.py --output json --show-disabled"
    )]
    Lint {
        #[arg(
            required = true,
            help = "Files or glob patterns, relative to the repository root"
        )]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            help = "Directory pylint is installed under (binary at <prefix>/bin/pylint)"
        )]
        prefix: Option<String>,
        #[arg(
            long = "option",
            allow_hyphen_values = true,
            help = "Extra pylint option, appended after configured ones (repeatable)"
        )]
        options: Vec<String>,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Also print messages whose code matched no rule"
        )]
        show_disabled: bool,
    },
}
