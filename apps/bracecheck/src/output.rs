//! Output rendering for scan, loop, and trace commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file fields, a top-level summary, and any read errors.

use crate::models::{LoopReport, RunReport, TraceReport};
use crate::utils;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JsonVal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Output format selected by `--output` or the config file.
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && utils::colors_enabled()
}

fn print_errors(errors: &[String]) {
    for e in errors {
        eprintln!("{} {}", utils::error_prefix(), e);
    }
}

fn print_json(value: &JsonVal) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print a scan report in the requested format.
pub fn print_scan(report: &RunReport, output: OutputMode, errors: &[String]) {
    match output {
        OutputMode::Json => print_json(&compose_scan_json(report, errors)),
        OutputMode::Human => {
            print!("{}", render_scan_human(report, use_colors(output)));
            print_errors(errors);
        }
    }
}

/// Human rendering of a scan report (pure) for testing.
pub fn render_scan_human(report: &RunReport, color: bool) -> String {
    let mut out = format!("files scanned: {}\n", report.summary.files);
    if report.passed() {
        let msg = "No basic issues detected.";
        if color {
            out.push_str(&format!("{}\n", msg.green()));
        } else {
            out.push_str(&format!("{}\n", msg));
        }
        return out;
    }
    out.push_str("\nPotential issues found:\n");
    for r in &report.results {
        if color {
            out.push_str(&format!("\n-- {}\n", r.path.bold()));
        } else {
            out.push_str(&format!("\n-- {}\n", r.path));
        }
        for is in &r.issues {
            let kind = format!("❲{}❳", is.kind);
            if color {
                out.push_str(&format!(
                    "   {} {} {}\n",
                    "✖".red(),
                    is.detail,
                    kind.bright_black()
                ));
            } else {
                out.push_str(&format!("   - {} {}\n", is.detail, kind));
            }
        }
    }
    let summary = format!(
        "\n— Summary — files={} with_issues={} issues={}",
        report.summary.files, report.summary.files_with_issues, report.summary.issues
    );
    if color {
        out.push_str(&format!("{}\n", summary.bold()));
    } else {
        out.push_str(&format!("{}\n", summary));
    }
    out
}

/// Compose scan JSON object (pure) for testing.
pub fn compose_scan_json(report: &RunReport, errors: &[String]) -> JsonVal {
    let mut out = serde_json::to_value(report).unwrap_or(JsonVal::Null);
    if let JsonVal::Object(map) = &mut out {
        map.insert("errors".into(), json!(errors));
    }
    out
}

/// Print per-file loop diagnostics.
pub fn print_loops(reports: &[LoopReport], output: OutputMode, errors: &[String]) {
    match output {
        OutputMode::Json => print_json(&json!({"results": reports, "errors": errors})),
        OutputMode::Human => {
            print!("{}", render_loops_human(reports, use_colors(output)));
            print_errors(errors);
        }
    }
}

/// Human rendering of loop diagnostics (pure) for testing.
pub fn render_loops_human(reports: &[LoopReport], color: bool) -> String {
    let mut out = String::new();
    for r in reports {
        if r.loops.is_empty() {
            out.push_str(&format!("{}: no for-loops found\n", r.path));
            continue;
        }
        let suspected = r.loops.iter().filter(|l| l.suspected.is_some()).count();
        out.push_str(&format!(
            "{}: {} for-loop(s), {} suspected closure capture(s)\n",
            r.path,
            r.loops.len(),
            suspected
        ));
        for l in &r.loops {
            let mut line = format!("  line {}: for ({}) [{}]", l.line, l.header.trim(), l.body);
            if let Some(var) = &l.suspected {
                let note = format!("lambda captures \"{}\"", var);
                if color {
                    line.push_str(&format!(" {} {}", "▲".yellow(), note.yellow()));
                } else {
                    line.push_str(&format!(" ▲ {}", note));
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Print per-file line-balance traces.
pub fn print_traces(reports: &[TraceReport], output: OutputMode, errors: &[String]) {
    match output {
        OutputMode::Json => print_json(&json!({"results": reports, "errors": errors})),
        OutputMode::Human => {
            print!("{}", render_traces_human(reports, use_colors(output)));
            print_errors(errors);
        }
    }
}

/// Human rendering of trace results (pure) for testing.
pub fn render_traces_human(reports: &[TraceReport], color: bool) -> String {
    let mut out = String::new();
    for r in reports {
        let outcome = r.outcome.to_string();
        let outcome = if color && r.outcome.issue(r.delimiter).is_some() {
            outcome.red().to_string()
        } else {
            outcome
        };
        out.push_str(&format!("{}: {} [{}]\n", r.path, outcome, r.delimiter));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Issue, IssueKind, LoopEntry, ScanResult};
    use crate::trace::{Delimiter, TraceOutcome};

    fn sample_report() -> RunReport {
        RunReport::from_results(vec![
            ScanResult {
                path: "src/A.cs".into(),
                issues: vec![
                    Issue::new(IssueKind::UnbalancedBraces, "unbalanced braces: { 2 vs } 1"),
                    Issue::new(IssueKind::MarkerFound, "contains TODO/FIXME (1)"),
                ],
            },
            ScanResult {
                path: "src/B.cs".into(),
                issues: vec![],
            },
        ])
    }

    #[test]
    fn test_compose_scan_json_shape() {
        let out = compose_scan_json(&sample_report(), &["cannot read x.cs".to_string()]);
        assert_eq!(out["summary"]["files"], 2);
        assert_eq!(out["summary"]["issues"], 2);
        assert_eq!(out["results"][0]["path"], "src/A.cs");
        assert_eq!(out["results"][0]["issues"][0]["kind"], "unbalanced-braces");
        assert_eq!(out["errors"][0], "cannot read x.cs");
    }

    #[test]
    fn test_render_scan_human_plain() {
        let text = render_scan_human(&sample_report(), false);
        assert!(text.starts_with("files scanned: 2\n"));
        assert!(text.contains("\n-- src/A.cs\n"));
        assert!(text.contains("   - unbalanced braces: { 2 vs } 1 ❲unbalanced-braces❳\n"));
        assert!(!text.contains("B.cs"));
        assert!(text.contains("files=2 with_issues=1 issues=2"));
    }

    #[test]
    fn test_render_scan_human_clean_run() {
        let report = RunReport::from_results(vec![]);
        let text = render_scan_human(&report, false);
        assert_eq!(text, "files scanned: 0\nNo basic issues detected.\n");
    }

    #[test]
    fn test_render_loops_human() {
        let reports = vec![
            LoopReport {
                path: "A.cs".into(),
                loops: vec![LoopEntry {
                    line: 4,
                    header: "int i = 0; i < 3; i++".into(),
                    body: "block",
                    suspected: Some("i".into()),
                }],
            },
            LoopReport {
                path: "B.cs".into(),
                loops: vec![],
            },
        ];
        let text = render_loops_human(&reports, false);
        assert!(text.contains("A.cs: 1 for-loop(s), 1 suspected closure capture(s)\n"));
        assert!(text.contains("  line 4: for (int i = 0; i < 3; i++) [block] ▲ lambda captures \"i\"\n"));
        assert!(text.contains("B.cs: no for-loops found\n"));
    }

    #[test]
    fn test_render_traces_human_and_json() {
        let reports = vec![
            TraceReport {
                path: "A.cs".into(),
                delimiter: Delimiter::Paren,
                outcome: TraceOutcome::Final {
                    balance: 0,
                    lines: 12,
                },
            },
            TraceReport {
                path: "B.cs".into(),
                delimiter: Delimiter::Brace,
                outcome: TraceOutcome::Negative { line: 3 },
            },
        ];
        let text = render_traces_human(&reports, false);
        assert_eq!(
            text,
            "A.cs: final balance 0 (lines 12) [paren]\nB.cs: negative balance at line 3 [brace]\n"
        );
        let v = serde_json::to_value(&reports).unwrap();
        assert_eq!(v[1]["outcome"], "negative");
        assert_eq!(v[1]["line"], 3);
        assert_eq!(v[1]["delimiter"], "brace");
    }
}
