//! Delimiter balance checks.
//!
//! Braces and parentheses are counted over stripped text so delimiters
//! inside comments and literals are ignored. Quote characters are counted
//! over the raw text as an independent cross-check of the stripper.

use crate::models::{Issue, IssueKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Whether an odd number of `'` in the raw text is reported.
///
/// `Lenient` is the default: apostrophes in comments and docs are common
/// and harmless, so counting them yields false positives. `Strict` reports
/// them anyway.
pub enum QuotePolicy {
    #[default]
    Lenient,
    Strict,
}

impl QuotePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            QuotePolicy::Strict
        } else {
            QuotePolicy::Lenient
        }
    }
}

/// Count `open` and `close` occurrences in `text`.
pub fn count_pair(text: &str, open: char, close: char) -> (usize, usize) {
    text.chars().fold((0, 0), |(o, c), ch| {
        if ch == open {
            (o + 1, c)
        } else if ch == close {
            (o, c + 1)
        } else {
            (o, c)
        }
    })
}

/// Check brace/paren balance on `stripped` and quote parity on `raw`.
pub fn check_balance(raw: &str, stripped: &str, policy: QuotePolicy) -> Vec<Issue> {
    let mut issues = Vec::new();
    let (open, close) = count_pair(stripped, '{', '}');
    if open != close {
        issues.push(Issue::new(
            IssueKind::UnbalancedBraces,
            format!("unbalanced braces: {{ {} vs }} {}", open, close),
        ));
    }
    let (open, close) = count_pair(stripped, '(', ')');
    if open != close {
        issues.push(Issue::new(
            IssueKind::UnbalancedParens,
            format!("unbalanced parens: ( {} vs ) {}", open, close),
        ));
    }
    if raw.matches('"').count() % 2 != 0 {
        issues.push(Issue::new(
            IssueKind::OddQuoteCount,
            "odd number of double quotes",
        ));
    }
    if policy == QuotePolicy::Strict && raw.matches('\'').count() % 2 != 0 {
        issues.push(Issue::new(
            IssueKind::OddQuoteCount,
            "odd number of single quotes",
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::strip;

    fn check(raw: &str, policy: QuotePolicy) -> Vec<Issue> {
        check_balance(raw, &strip(raw), policy)
    }

    #[test]
    fn test_balanced_braces_emit_nothing() {
        let raw = "class A { void F() { } }";
        assert!(check(raw, QuotePolicy::Lenient).is_empty());
    }

    #[test]
    fn test_one_extra_close_reports_both_counts() {
        let raw = "class A { void F() { } } }";
        let issues = check(raw, QuotePolicy::Lenient);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnbalancedBraces);
        assert_eq!(issues[0].detail, "unbalanced braces: { 2 vs } 3");
    }

    #[test]
    fn test_brace_in_literal_is_not_counted() {
        let raw = r#"x = "{""#;
        assert_eq!(count_pair(&strip(raw), '{', '}'), (0, 0));
        assert_eq!(count_pair(raw, '{', '}'), (1, 0));
        assert!(check(raw, QuotePolicy::Lenient).is_empty());
    }

    #[test]
    fn test_unbalanced_parens() {
        let issues = check("F(a, (b);", QuotePolicy::Lenient);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnbalancedParens);
        assert_eq!(issues[0].detail, "unbalanced parens: ( 2 vs ) 1");
    }

    #[test]
    fn test_odd_double_quotes_counted_on_raw_text() {
        let issues = check("s = \"open;\n", QuotePolicy::Lenient);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::OddQuoteCount);
        assert_eq!(issues[0].detail, "odd number of double quotes");
    }

    #[test]
    fn test_apostrophe_only_flagged_in_strict_mode() {
        let raw = "// don't panic\nint x;\n";
        assert!(check(raw, QuotePolicy::Lenient).is_empty());
        let strict = check(raw, QuotePolicy::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].detail, "odd number of single quotes");
    }

    #[test]
    fn test_empty_text_is_clean() {
        assert!(check("", QuotePolicy::Strict).is_empty());
    }
}
