//! Relint core library.
//!
//! This crate runs pylint on Python files, parses the messages it prints,
//! and re-classifies each message code into a severity using user-supplied
//! regular expressions.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery, the key-value config store, and effective settings.
//! - `severity`: Ordered regex rules mapping message codes to severities.
//! - `invocation`: Binary resolution, `PYTHONPATH` assembly, and options.
//! - `runner`: Process execution and findings-vs-failure disambiguation.
//! - `parser`: Line parser turning pylint output into diagnostics.
//! - `lint`: Per-file and multi-file lint passes.
//! - `models`: Diagnostic and result structs.
//! - `output`: Human/JSON printers.
//! - `error`: Error types.
pub mod cli;
pub mod config;
pub mod error;
pub mod invocation;
pub mod lint;
pub mod models;
pub mod output;
pub mod parser;
pub mod runner;
pub mod severity;

pub use error::RelintError;
pub use lint::{LintTarget, PylintLinter};
pub use models::Diagnostic;
pub use severity::{Severity, SeverityRules};
