//! Line-oriented balance tracing for a single delimiter type.
//!
//! Unlike [`crate::balance`], this pass counts delimiters literally,
//! including inside comments and strings. It reports where the running
//! balance first goes negative, which is usually where an extra close was
//! typed.

use crate::models::{Issue, IssueKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Delimiter pair tracked by the tracer.
pub enum Delimiter {
    #[default]
    Paren,
    Brace,
    Bracket,
}

impl Delimiter {
    pub fn pair(self) -> (char, char) {
        match self {
            Delimiter::Paren => ('(', ')'),
            Delimiter::Brace => ('{', '}'),
            Delimiter::Bracket => ('[', ']'),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Paren => "paren",
            Delimiter::Brace => "brace",
            Delimiter::Bracket => "bracket",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
/// Result of a trace.
pub enum TraceOutcome {
    /// Balance never went negative; `balance` is opens minus closes.
    Final { balance: i64, lines: usize },
    /// First 1-based line where the running balance dropped below zero.
    Negative { line: usize },
}

impl TraceOutcome {
    /// A `negative-balance` issue for [`TraceOutcome::Negative`].
    pub fn issue(&self, delimiter: Delimiter) -> Option<Issue> {
        match *self {
            TraceOutcome::Negative { line } => Some(Issue::new(
                IssueKind::NegativeBalance,
                format!("negative {} balance at line {}", delimiter, line),
            )),
            TraceOutcome::Final { .. } => None,
        }
    }
}

impl fmt::Display for TraceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceOutcome::Final { balance, lines } => {
                write!(f, "final balance {} (lines {})", balance, lines)
            }
            TraceOutcome::Negative { line } => write!(f, "negative balance at line {}", line),
        }
    }
}

/// Trace `lines` top to bottom, stopping at the first negative balance.
pub fn trace_lines<'a, I>(lines: I, delimiter: Delimiter) -> TraceOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let (open, close) = delimiter.pair();
    let mut balance = 0i64;
    let mut count = 0usize;
    for (idx, line) in lines.into_iter().enumerate() {
        count = idx + 1;
        for ch in line.chars() {
            if ch == open {
                balance += 1;
            } else if ch == close {
                balance -= 1;
            }
            if balance < 0 {
                return TraceOutcome::Negative { line: count };
            }
        }
    }
    TraceOutcome::Final {
        balance,
        lines: count,
    }
}

/// Split `text` on `\r\n`, `\r` or `\n`. A trailing break does not start
/// an extra empty line.
pub fn source_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(at) = rest.find(|c: char| c == '\r' || c == '\n') else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..at];
        let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + width..];
        Some(line)
    })
}

/// Trace a whole text split into lines.
pub fn trace(text: &str, delimiter: Delimiter) -> TraceOutcome {
    trace_lines(source_lines(text), delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_stops_at_first_negative_line() {
        let lines = ["{", "}", "}", "}", "{"];
        let consumed = Cell::new(0);
        let outcome = trace_lines(
            lines.iter().map(|l| {
                consumed.set(consumed.get() + 1);
                *l
            }),
            Delimiter::Brace,
        );
        assert_eq!(outcome, TraceOutcome::Negative { line: 3 });
        assert_eq!(consumed.get(), 3);
    }

    #[test]
    fn test_final_balance_and_line_count() {
        let text = "F(a,\n  (b)\n";
        assert_eq!(
            trace(text, Delimiter::Paren),
            TraceOutcome::Final {
                balance: 1,
                lines: 2
            }
        );
        assert_eq!(
            trace("", Delimiter::Paren),
            TraceOutcome::Final {
                balance: 0,
                lines: 0
            }
        );
    }

    #[test]
    fn test_counts_delimiters_inside_literals() {
        // The tracer does not strip: the ')' inside the string counts.
        let text = "x = \")\";\n";
        assert_eq!(
            trace(text, Delimiter::Paren),
            TraceOutcome::Negative { line: 1 }
        );
    }

    #[test]
    fn test_dip_below_zero_mid_line_is_reported() {
        // Ends balanced on the line, but goes negative before the '('.
        let text = "a\n) (\n";
        assert_eq!(
            trace(text, Delimiter::Paren),
            TraceOutcome::Negative { line: 2 }
        );
    }

    #[test]
    fn test_bare_cr_and_crlf_break_lines() {
        let lines: Vec<_> = source_lines("a\rb\r\nc\n\nd\r").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        assert_eq!(
            trace("{\r}\r}\r{", Delimiter::Brace),
            TraceOutcome::Negative { line: 3 }
        );
        assert_eq!(
            trace("(\r\n)\r\n", Delimiter::Paren),
            TraceOutcome::Final {
                balance: 0,
                lines: 2
            }
        );
    }

    #[test]
    fn test_issue_and_display() {
        let neg = TraceOutcome::Negative { line: 7 };
        let issue = neg.issue(Delimiter::Bracket).unwrap();
        assert_eq!(issue.kind, IssueKind::NegativeBalance);
        assert_eq!(issue.detail, "negative bracket balance at line 7");
        assert_eq!(neg.to_string(), "negative balance at line 7");
        let fin = TraceOutcome::Final {
            balance: 0,
            lines: 3,
        };
        assert!(fin.issue(Delimiter::Paren).is_none());
        assert_eq!(fin.to_string(), "final balance 0 (lines 3)");
    }
}
