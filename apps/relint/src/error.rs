//! Error taxonomy shared by the classifier, invocation builder, and runner.
//!
//! Configuration errors are raised before any process is launched. Invocation
//! failures carry both captured streams so the caller can diagnose them.
//! Lines of tool output that do not look like diagnostics are not errors.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors surfaced by a lint pass.
#[derive(Debug, thiserror::Error)]
pub enum RelintError {
    /// None of the error/warning/advice tiers has a single pattern.
    #[error(
        "no severity rules configured: set at least one of 'lint.pylint.codes.error', \
         'lint.pylint.codes.warning' or 'lint.pylint.codes.advice'"
    )]
    NoSeverityRules,

    /// A configured severity pattern is not a valid regular expression.
    #[error("invalid {tier} pattern '{pattern}': {source}")]
    InvalidPattern {
        tier: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The external tool could not be located on disk or on the search path.
    #[error(
        "pylint does not appear to be installed: '{}' was not found; install it \
         or set 'lint.pylint.prefix' to the directory where it resides",
        candidate.display()
    )]
    BinaryNotFound { candidate: PathBuf },

    /// A configured extra option has unbalanced quotes or escapes.
    #[error("invalid pylint option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// The configuration file exists but could not be read or parsed.
    #[error("failed to load configuration {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The process could not be spawned at all.
    #[error("failed to launch '{}': {source}", binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited non-zero with unexpected stderr.
    #[error("pylint failed ({status}):\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    ToolFailed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

impl RelintError {
    /// True for errors rooted in environment setup rather than a specific run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RelintError::NoSeverityRules
                | RelintError::InvalidPattern { .. }
                | RelintError::BinaryNotFound { .. }
                | RelintError::InvalidOption { .. }
                | RelintError::ConfigParse { .. }
        )
    }
}
