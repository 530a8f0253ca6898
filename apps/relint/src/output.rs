//! Output rendering for lint results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! the diagnostics, failed files, and a top-level summary.
//!
//! This is where `disabled` diagnostics are dropped: they are hidden unless
//! `show_disabled` is set, but always counted in the summary.

use crate::models::{Diagnostic, LintResult};
use crate::severity::Severity;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn visible(d: &Diagnostic, show_disabled: bool) -> bool {
    show_disabled || d.severity != Severity::Disabled
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str, show_disabled: bool) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_lint_json(res, show_disabled))
                .unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for d in res.diagnostics.iter().filter(|d| visible(d, show_disabled)) {
                println!("{}", render_human(d, color));
            }
            for f in &res.failures {
                let head = if color {
                    "⟦failed⟧".red().bold().to_string()
                } else {
                    "⟦failed⟧".to_string()
                };
                eprintln!("✖ {} {} — {}", head, f.path, f.message);
            }
            let s = &res.summary;
            let summary = format!(
                "— Summary — errors={} warnings={} advice={} disabled={} files={} failed={}",
                s.errors, s.warnings, s.advice, s.disabled, s.files, s.failed
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// One human-readable line for a diagnostic.
pub fn render_human(d: &Diagnostic, color: bool) -> String {
    let tag = format!("⟦{}⟧", d.severity);
    let (icon, tag) = match d.severity {
        Severity::Error => ("✖", color_or(tag, color, |t| t.red().bold().to_string())),
        Severity::Warning => ("▲", color_or(tag, color, |t| t.yellow().bold().to_string())),
        Severity::Advice => ("◆", color_or(tag, color, |t| t.blue().bold().to_string())),
        Severity::Disabled => ("·", color_or(tag, color, |t| t.bright_black().to_string())),
    };
    let location = format!("{}:{}", d.path, d.line);
    let location = color_or(location, color, |l| l.bold().to_string());
    format!("{} {} {} ❲{}❳ — {}", icon, tag, location, d.name, d.description)
}

fn color_or(s: String, color: bool, paint: impl Fn(&str) -> String) -> String {
    if color {
        paint(&s)
    } else {
        s
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult, show_disabled: bool) -> JsonVal {
    let diagnostics: Vec<&Diagnostic> = res
        .diagnostics
        .iter()
        .filter(|d| visible(d, show_disabled))
        .collect();
    json!({
        "diagnostics": diagnostics,
        "failures": res.failures,
        "summary": res.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileFailure, Summary};

    fn diag(code: &str, severity: Severity) -> Diagnostic {
        Diagnostic {
            path: "m.py".into(),
            line: 3,
            code: code.into(),
            name: format!("PyLint {code}"),
            description: "msg".into(),
            severity,
        }
    }

    fn result() -> LintResult {
        let diagnostics = vec![diag("E0602", Severity::Error), diag("I0011", Severity::Disabled)];
        let summary = Summary::tally(&diagnostics, 2, 1);
        LintResult {
            diagnostics,
            failures: vec![FileFailure {
                path: "broken.py".into(),
                message: "pylint failed".into(),
            }],
            summary,
        }
    }

    #[test]
    fn test_compose_lint_json_hides_disabled_by_default() {
        let out = compose_lint_json(&result(), false);
        assert_eq!(out["diagnostics"].as_array().unwrap().len(), 1);
        assert_eq!(out["diagnostics"][0]["severity"], "error");
        assert_eq!(out["diagnostics"][0]["line"], 3);
        assert_eq!(out["summary"]["disabled"], 1);
        assert_eq!(out["failures"][0]["path"], "broken.py");
    }

    #[test]
    fn test_compose_lint_json_show_disabled() {
        let out = compose_lint_json(&result(), true);
        assert_eq!(out["diagnostics"].as_array().unwrap().len(), 2);
        assert_eq!(out["diagnostics"][1]["severity"], "disabled");
    }

    #[test]
    fn test_render_human_plain() {
        let line = render_human(&diag("W0612", Severity::Warning), false);
        assert_eq!(line, "▲ ⟦warning⟧ m.py:3 ❲PyLint W0612❳ — msg");
    }
}
