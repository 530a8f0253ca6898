//! Lint runner wiring binary resolution, execution, and parsing.
//!
//! A `PylintLinter` is built once from `LinterSettings`: the severity rules
//! are compiled and the binary located up front, so configuration mistakes
//! surface before any file is touched. Each `lint_path` call is then an
//! independent pass over one file.

use crate::config::LinterSettings;
use crate::error::RelintError;
use crate::invocation::{build_options, resolve_binary, Invocation};
use crate::models::{Diagnostic, FileFailure, LintResult, Summary};
use crate::parser::parse_output;
use crate::runner::{self, ProcessExecutor, SystemExecutor};
use crate::severity::SeverityRules;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file to lint: the path to report and the path handed to the tool.
#[derive(Debug, Clone)]
pub struct LintTarget {
    pub display: String,
    pub on_disk: PathBuf,
}

#[derive(Debug)]
pub struct PylintLinter<E: ProcessExecutor = SystemExecutor> {
    settings: LinterSettings,
    rules: SeverityRules,
    binary: PathBuf,
    executor: E,
}

impl PylintLinter<SystemExecutor> {
    pub fn new(settings: LinterSettings) -> Result<Self, RelintError> {
        Self::with_executor(settings, SystemExecutor)
    }
}

impl<E: ProcessExecutor> PylintLinter<E> {
    /// Validate rules and options, locate pylint, then keep `executor` for runs.
    pub fn with_executor(settings: LinterSettings, executor: E) -> Result<Self, RelintError> {
        let rules = SeverityRules::new(&settings.patterns)?;
        build_options(&settings.options)?;
        let binary = resolve_binary(settings.prefix.as_deref())?;
        Ok(PylintLinter {
            settings,
            rules,
            binary,
            executor,
        })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Lint one file. Either every diagnostic is returned or the failure.
    pub fn lint_path(&self, path: &str, on_disk: &Path) -> Result<Vec<Diagnostic>, RelintError> {
        let invocation = Invocation::build(self.binary.clone(), &self.settings, on_disk)?;
        let stdout = runner::run(&self.executor, &invocation)?;
        let diagnostics = parse_output(&stdout, path, &self.rules);
        debug!(path = %path, count = diagnostics.len(), "parsed pylint output");
        Ok(diagnostics)
    }

    /// Lint many files in parallel, collecting per-file failures separately.
    ///
    /// Diagnostics are ordered by path, then line; failures by path.
    pub fn run_lint(&self, targets: &[LintTarget]) -> LintResult {
        let per_file: Vec<Result<Vec<Diagnostic>, FileFailure>> = targets
            .par_iter()
            .map(|t| {
                self.lint_path(&t.display, &t.on_disk).map_err(|e| {
                    warn!(path = %t.display, error = %e, "lint failed");
                    FileFailure {
                        path: t.display.clone(),
                        message: e.to_string(),
                    }
                })
            })
            .collect();

        let mut diagnostics = Vec::new();
        let mut failures = Vec::new();
        for r in per_file {
            match r {
                Ok(mut ds) => diagnostics.append(&mut ds),
                Err(f) => failures.push(f),
            }
        }
        // Stable sort keeps stream order among same-line records.
        diagnostics.sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
        failures.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = Summary::tally(&diagnostics, targets.len(), failures.len());
        LintResult {
            diagnostics,
            failures,
            summary,
        }
    }
}
