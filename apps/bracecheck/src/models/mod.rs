//! Shared data models for scan results and diagnostic reports.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Category of a reported issue.
pub enum IssueKind {
    UnbalancedBraces,
    UnbalancedParens,
    OddQuoteCount,
    MarkerFound,
    ClosureCaptureSuspected,
    NegativeBalance,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::UnbalancedBraces => "unbalanced-braces",
            IssueKind::UnbalancedParens => "unbalanced-parens",
            IssueKind::OddQuoteCount => "odd-quote-count",
            IssueKind::MarkerFound => "marker-found",
            IssueKind::ClosureCaptureSuspected => "closure-capture-suspected",
            IssueKind::NegativeBalance => "negative-balance",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single finding with a display-ready detail string.
pub struct Issue {
    pub kind: IssueKind,
    pub detail: String,
}

impl Issue {
    pub fn new(kind: IssueKind, detail: impl Into<String>) -> Self {
        Issue {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Issues found in one file, in detection order.
pub struct ScanResult {
    pub path: String,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counters used by printers and the exit status.
pub struct Summary {
    pub files: usize,
    pub files_with_issues: usize,
    pub issues: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Run-level report built from per-file results.
///
/// Only files with at least one issue are kept in `results`; `summary.files`
/// still counts every scanned file.
pub struct RunReport {
    pub results: Vec<ScanResult>,
    pub summary: Summary,
}

impl RunReport {
    /// Build a report from per-file results, sorted by path.
    pub fn from_results(mut all: Vec<ScanResult>) -> Self {
        let files = all.len();
        all.retain(|r| !r.issues.is_empty());
        all.sort_by(|a, b| a.path.cmp(&b.path));
        let issues = all.iter().map(|r| r.issues.len()).sum();
        RunReport {
            summary: Summary {
                files,
                files_with_issues: all.len(),
                issues,
            },
            results: all,
        }
    }

    /// True when no scanned file produced an issue.
    pub fn passed(&self) -> bool {
        self.summary.issues == 0
    }
}

#[derive(Debug, Clone, Serialize)]
/// One loop site as shown by the `loops` diagnostic.
pub struct LoopEntry {
    pub line: usize,
    pub header: String,
    pub body: &'static str,
    pub suspected: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
/// Loop diagnostic for one file.
pub struct LoopReport {
    pub path: String,
    pub loops: Vec<LoopEntry>,
}

#[derive(Debug, Clone, Serialize)]
/// Line-balance trace for one file.
pub struct TraceReport {
    pub path: String,
    pub delimiter: crate::trace::Delimiter,
    #[serde(flatten)]
    pub outcome: crate::trace::TraceOutcome,
}
