//! Execution of an `Invocation` and interpretation of its exit.
//!
//! pylint exits non-zero whenever it reports anything, so a non-zero status
//! alone does not mean the run failed. The only accepted stderr alongside a
//! non-zero status is the notice pylint prints when no rc file exists.

use crate::error::RelintError;
use crate::invocation::Invocation;
use std::process::ExitStatus;
use tracing::{debug, trace};

/// Exact stderr pylint emits when it falls back to its default configuration.
pub const BENIGN_STDERR: &str = "No config file found, using default configuration\n";

#[derive(Debug)]
/// Streams and status captured from one process.
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Launches processes. Implemented by `SystemExecutor`; tests swap in fakes.
pub trait ProcessExecutor: Sync {
    fn execute(&self, invocation: &Invocation) -> std::io::Result<CapturedOutput>;
}

/// Runs the invocation as a child process and waits for it to exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    fn execute(&self, invocation: &Invocation) -> std::io::Result<CapturedOutput> {
        let out = invocation.command().output()?;
        Ok(CapturedOutput {
            status: out.status,
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

#[derive(Debug)]
/// How a finished run is to be treated.
pub enum RunOutcome {
    /// Zero exit status.
    Success { stdout: String },
    /// Non-zero exit with only the benign notice on stderr.
    Findings { stdout: String },
    /// Anything else; both streams are kept for diagnosis.
    Fatal {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

impl RunOutcome {
    pub fn classify(captured: CapturedOutput) -> Self {
        let CapturedOutput {
            status,
            stdout,
            stderr,
        } = captured;
        if status.success() {
            RunOutcome::Success { stdout }
        } else if stderr == BENIGN_STDERR {
            RunOutcome::Findings { stdout }
        } else {
            RunOutcome::Fatal {
                status,
                stdout,
                stderr,
            }
        }
    }

    /// Collapse to the stdout to parse, or the fatal error.
    pub fn into_stdout(self) -> Result<String, RelintError> {
        match self {
            RunOutcome::Success { stdout } | RunOutcome::Findings { stdout } => Ok(stdout),
            RunOutcome::Fatal {
                status,
                stdout,
                stderr,
            } => Err(RelintError::ToolFailed {
                status,
                stdout,
                stderr,
            }),
        }
    }
}

/// Execute one invocation and return its stdout or a fatal error.
pub fn run(executor: &dyn ProcessExecutor, invocation: &Invocation) -> Result<String, RelintError> {
    debug!(
        binary = %invocation.binary.display(),
        options = %invocation.options_line(),
        target = %invocation.target.display(),
        "running pylint"
    );
    let captured = executor
        .execute(invocation)
        .map_err(|source| RelintError::Launch {
            binary: invocation.binary.clone(),
            source,
        })?;
    trace!(status = %captured.status, stderr = %captured.stderr, "pylint exited");
    let outcome = RunOutcome::classify(captured);
    if let RunOutcome::Findings { .. } = outcome {
        debug!("non-zero exit with default-configuration notice; treating as findings");
    }
    outcome.into_stdout()
}
