//! Severity classification of tool message codes.
//!
//! Users map pylint message codes onto four severities with regular
//! expressions, one list per tier. Tiers are consulted in the fixed order
//! error, warning, advice and the first matching pattern wins. A code that
//! matches nothing is `Disabled`.
//!
//! Patterns are unanchored (`^E` and `E0` both match `E0001`); anchor them
//! explicitly to match exact codes, e.g. `^E(0001|0002)$`.

use crate::error::RelintError;
use regex::Regex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Normalized severity attached to every diagnostic.
pub enum Severity {
    Error,
    Warning,
    Advice,
    /// Matched no rule; hidden by the reporting sink unless asked for.
    Disabled,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Advice => "advice",
            Severity::Disabled => "disabled",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, uncompiled patterns per tier as read from configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeverityPatterns {
    pub error: Vec<String>,
    pub warning: Vec<String>,
    pub advice: Vec<String>,
}

impl SeverityPatterns {
    /// True when at least one tier carries a non-blank pattern.
    pub fn is_configured(&self) -> bool {
        [&self.error, &self.warning, &self.advice]
            .iter()
            .any(|tier| tier.iter().any(|p| !p.trim().is_empty()))
    }
}

/// Compiled, immutable rule set. Construction fails when unconfigured.
#[derive(Debug, Clone)]
pub struct SeverityRules {
    tiers: Vec<(Severity, Vec<Regex>)>,
}

impl SeverityRules {
    /// Compile the three tiers. Blank patterns are ignored.
    pub fn new(patterns: &SeverityPatterns) -> Result<Self, RelintError> {
        if !patterns.is_configured() {
            return Err(RelintError::NoSeverityRules);
        }
        let tiers = vec![
            (Severity::Error, compile_tier("error", &patterns.error)?),
            (Severity::Warning, compile_tier("warning", &patterns.warning)?),
            (Severity::Advice, compile_tier("advice", &patterns.advice)?),
        ];
        Ok(SeverityRules { tiers })
    }

    /// Resolve the severity for a single message code.
    pub fn classify(&self, code: &str) -> Severity {
        for (sev, regexes) in &self.tiers {
            if regexes.iter().any(|re| re.is_match(code)) {
                return *sev;
            }
        }
        Severity::Disabled
    }
}

fn compile_tier(tier: &'static str, patterns: &[String]) -> Result<Vec<Regex>, RelintError> {
    patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            Regex::new(p).map_err(|source| RelintError::InvalidPattern {
                tier,
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}
