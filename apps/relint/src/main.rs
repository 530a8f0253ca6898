//! Relint CLI binary entry point.
//! Resolves configuration, expands target patterns, lints, and prints results.

use clap::Parser;
use glob::glob;
use owo_colors::OwoColorize;
use relint::cli::{Cli, Commands};
use relint::config;
use relint::lint::{LintTarget, PylintLinter};
use relint::output;
use relint::RelintError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        "error:".to_string()
    } else {
        "error:".red().bold().to_string()
    }
}

fn note_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        "note:".to_string()
    } else {
        "note:".cyan().bold().to_string()
    }
}

/// Hint printed under configuration errors.
fn config_hint(e: &RelintError) -> Option<&'static str> {
    e.is_configuration().then_some(
        "check the [pylint] section of relint.toml or the matching lint flags",
    )
}

fn fail(e: &RelintError) -> ! {
    eprintln!("{} {}", error_prefix(), e);
    if let Some(hint) = config_hint(e) {
        eprintln!("{} {}", note_prefix(), hint);
    }
    std::process::exit(2);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RELINT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Expand glob patterns under `root` into files, deduplicated and sorted.
fn expand_targets(root: &Path, patterns: &[String]) -> Result<Vec<LintTarget>, String> {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|e| format!("bad glob pattern '{}': {}", pat, e))?;
        let before = files.len();
        for p in entries.flatten() {
            if p.is_file() {
                files.insert(p);
            }
        }
        if files.len() == before {
            warn!(pattern = %pat, "pattern matched no files");
        }
    }
    Ok(files
        .into_iter()
        .map(|p| LintTarget {
            display: pathdiff::diff_paths(&p, root)
                .unwrap_or_else(|| p.clone())
                .to_string_lossy()
                .to_string(),
            on_disk: p,
        })
        .collect())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            paths,
            repo_root,
            output,
            prefix,
            options,
            show_disabled,
        } => {
            let eff = match config::resolve_effective(
                repo_root.as_deref(),
                output.as_deref(),
                prefix.as_deref(),
                &options,
                if show_disabled { Some(true) } else { None },
            ) {
                Ok(eff) => eff,
                Err(e) => fail(&e),
            };
            if !eff.config_found {
                eprintln!("{} No relint.toml found; using defaults.", note_prefix());
            }
            // Rules and binary are validated before any file is expanded or run.
            let linter = match PylintLinter::new(eff.settings.clone()) {
                Ok(l) => l,
                Err(e) => fail(&e),
            };
            let targets = match expand_targets(&eff.repo_root, &paths) {
                Ok(t) => t,
                Err(msg) => {
                    eprintln!("{} {}", error_prefix(), msg);
                    std::process::exit(2);
                }
            };
            let result = linter.run_lint(&targets);
            output::print_lint(&result, &eff.output, eff.show_disabled);
            if !result.failures.is_empty() {
                std::process::exit(2);
            }
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
    }
}
