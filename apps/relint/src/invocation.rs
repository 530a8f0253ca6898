//! Construction of one pylint invocation.
//!
//! An `Invocation` is a structured command: binary, argument list, and the
//! `PYTHONPATH` value to export. Nothing is interpolated into a shell line.

use crate::config::LinterSettings;
use crate::error::RelintError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Executable name looked up under `<prefix>/bin` or on `PATH`.
pub const TOOL_BINARY: &str = "pylint";

/// Environment variable carrying the auxiliary library search path.
pub const SEARCH_PATH_VAR: &str = "PYTHONPATH";

/// Library directory appended to each configured prefix.
pub const SITE_PACKAGES_SUBPATH: &str = "lib/python2.6/site-packages";

/// `-rn`: no report/summary at the end. `-iy`: include message codes.
pub const BASELINE_OPTIONS: [&str; 2] = ["-rn", "-iy"];

#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully formed command for linting one file.
pub struct Invocation {
    pub binary: PathBuf,
    pub args: Vec<String>,
    pub target: PathBuf,
    /// Auxiliary search path, ending in an empty segment.
    pub search_path: String,
}

impl Invocation {
    /// Assemble an invocation for `target` from settings.
    pub fn build(
        binary: PathBuf,
        settings: &LinterSettings,
        target: &Path,
    ) -> Result<Self, RelintError> {
        Ok(Invocation {
            binary,
            args: build_options(&settings.options)?,
            target: target.to_path_buf(),
            search_path: build_search_path(&settings.library_prefixes()),
        })
    }

    /// Options joined with spaces, for logs and error messages.
    pub fn options_line(&self) -> String {
        self.args.join(" ")
    }

    /// The `PYTHONPATH` to export: ours prepended to the caller's value.
    pub fn search_path_env(&self, inherited: Option<OsString>) -> OsString {
        let mut value = OsString::from(&self.search_path);
        if let Some(prev) = inherited {
            value.push(prev);
        }
        value
    }

    /// Materialize a `std::process::Command` with args and environment set.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .arg(&self.target)
            .env(
                SEARCH_PATH_VAR,
                self.search_path_env(std::env::var_os(SEARCH_PATH_VAR)),
            );
        cmd
    }
}

/// Locate the tool binary, checked eagerly before any launch.
///
/// With a prefix the candidate is `<prefix>/bin/pylint`; otherwise the bare
/// name. An empty prefix counts as unset. A candidate that exists on disk is
/// used as-is, else it must resolve through the executable search path.
pub fn resolve_binary(prefix: Option<&Path>) -> Result<PathBuf, RelintError> {
    let prefix = prefix.filter(|p| !p.as_os_str().is_empty());
    let candidate = match prefix {
        Some(p) => p.join("bin").join(TOOL_BINARY),
        None => PathBuf::from(TOOL_BINARY),
    };
    if candidate.exists() {
        debug!(binary = %candidate.display(), "using pylint from disk");
        return Ok(candidate);
    }
    match which::which(&candidate) {
        Ok(found) => {
            debug!(binary = %found.display(), "resolved pylint via search path");
            Ok(found)
        }
        Err(_) => Err(RelintError::BinaryNotFound { candidate }),
    }
}

/// Join prefix library directories with the platform separator, keeping a
/// trailing empty segment so an inherited search path can follow.
pub fn build_search_path(prefixes: &[&Path]) -> String {
    let mut out = String::new();
    for prefix in prefixes {
        out.push_str(&prefix.join(SITE_PACKAGES_SUBPATH).to_string_lossy());
        out.push(PATH_LIST_SEPARATOR);
    }
    out
}

/// Baseline options followed by user options in the order given.
///
/// A configured entry may hold several flags and is split with shell
/// quoting rules, so `--init-hook="import sys"` stays one argument.
pub fn build_options(extra: &[String]) -> Result<Vec<String>, RelintError> {
    let mut args: Vec<String> = BASELINE_OPTIONS.iter().map(|s| s.to_string()).collect();
    for option in extra {
        let words = shell_words::split(option).map_err(|e| RelintError::InvalidOption {
            option: option.clone(),
            message: e.to_string(),
        })?;
        args.extend(words);
    }
    Ok(args)
}
