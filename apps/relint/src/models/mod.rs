//! Shared data models for lint results and printers.

use crate::severity::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One diagnostic reported by the tool, with its resolved severity.
pub struct Diagnostic {
    pub path: String,
    /// 1-based, as numbered by the tool.
    pub line: usize,
    pub code: String,
    /// Linter display name followed by the code, e.g. `PyLint E0602`.
    pub name: String,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
/// A file whose lint pass failed outright.
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub advice: usize,
    pub disabled: usize,
    pub files: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<FileFailure>,
    pub summary: Summary,
}

impl Summary {
    /// Tally severities over `diagnostics`.
    pub fn tally(diagnostics: &[Diagnostic], files: usize, failed: usize) -> Self {
        let mut s = Summary {
            files,
            failed,
            ..Default::default()
        };
        for d in diagnostics {
            match d.severity {
                Severity::Error => s.errors += 1,
                Severity::Warning => s.warnings += 1,
                Severity::Advice => s.advice += 1,
                Severity::Disabled => s.disabled += 1,
            }
        }
        s
    }
}
