//! Parsing of pylint's textual output into diagnostics.
//!
//! With `-iy` pylint prints one message per line as `CODE: LINE: text`
//! (older releases pad with spaces, e.g. `E0001:  12: text`). Anything else
//! (module banners, blank lines) is skipped.

use crate::models::Diagnostic;
use crate::severity::SeverityRules;
use regex::Regex;
use std::sync::LazyLock;

/// Display name prefixed to every message code.
pub const LINTER_NAME: &str = "PyLint";

// ASCII digits only: `\d` in `regex` also matches other Unicode digits.
static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][0-9]+):\s*([0-9]+):\s*(.*)$").expect("valid message regex")
});

/// Parse `stdout` for `path`, classifying each code with `rules`.
///
/// Records come back in stream order. `Disabled` records are kept; hiding
/// them is up to the printer.
pub fn parse_output(stdout: &str, path: &str, rules: &SeverityRules) -> Vec<Diagnostic> {
    stdout
        .lines()
        .filter_map(|line| parse_line(line, path, rules))
        .collect()
}

fn parse_line(line: &str, path: &str, rules: &SeverityRules) -> Option<Diagnostic> {
    let caps = MESSAGE_RE.captures(line)?;
    let code = caps.get(1)?.as_str().trim();
    // Overflowing line numbers are treated like any other malformed line.
    let line_no: usize = caps.get(2)?.as_str().trim().parse().ok()?;
    let description = caps.get(3).map_or("", |m| m.as_str()).trim();
    Some(Diagnostic {
        path: path.to_string(),
        line: line_no,
        code: code.to_string(),
        name: format!("{LINTER_NAME} {code}"),
        description: description.to_string(),
        severity: rules.classify(code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{Severity, SeverityPatterns};

    fn rules() -> SeverityRules {
        SeverityRules::new(&SeverityPatterns {
            error: vec!["^E".into()],
            warning: vec!["^W".into()],
            advice: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_parse_padded_line() {
        let out = parse_output("E0001:  12:  Unused variable 'x'", "pkg/m.py", &rules());
        assert_eq!(out.len(), 1);
        let d = &out[0];
        assert_eq!(d.code, "E0001");
        assert_eq!(d.line, 12);
        assert_eq!(d.description, "Unused variable 'x'");
        assert_eq!(d.name, "PyLint E0001");
        assert_eq!(d.path, "pkg/m.py");
        assert_eq!(d.severity, Severity::Error);
    }

    #[test]
    fn test_banner_and_blank_lines_skipped() {
        let out = parse_output("************* Module foo\n\n   \n", "foo.py", &rules());
        assert!(out.is_empty());
    }

    #[test]
    fn test_stream_order_and_duplicates_preserved() {
        let stdout = "\
************* Module m
W0612:  3: Unused variable 'a'
C0103:  1: Invalid name \"m\"
W0612:  9: Unused variable 'b'
";
        let out = parse_output(stdout, "m.py", &rules());
        let seen: Vec<(&str, usize)> = out.iter().map(|d| (d.code.as_str(), d.line)).collect();
        assert_eq!(seen, vec![("W0612", 3), ("C0103", 1), ("W0612", 9)]);
        // Unmatched codes stay in the output as disabled.
        assert_eq!(out[1].severity, Severity::Disabled);
    }

    #[test]
    fn test_description_keeps_trailing_colons() {
        let line = "E1101: 7: Module 'os' has no 'x' member: see docs";
        let out = parse_output(line, "m.py", &rules());
        assert_eq!(out[0].description, "Module 'os' has no 'x' member: see docs");
    }

    #[test]
    fn test_non_ascii_digits_are_not_codes() {
        let out = parse_output("E\u{0663}\u{0664}: 5: weird", "m.py", &rules());
        assert!(out.is_empty());
        let out = parse_output("E0001: \u{0665}: weird", "m.py", &rules());
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_description_allowed() {
        let out = parse_output("W0101: 4:", "m.py", &rules());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].description, "");
    }

    #[test]
    fn test_reparse_is_identical() {
        let stdout = "E0602: 2: Undefined variable 'z'\nW0611: 1: Unused import os\n";
        let r = rules();
        assert_eq!(parse_output(stdout, "m.py", &r), parse_output(stdout, "m.py", &r));
    }
}
