//! Closure-capture heuristic for loop variables.
//!
//! A loop is suspicious when its header declares an integer-typed variable,
//! its body contains a lambda arrow (`=>`), and that variable's name appears
//! as a whole word in the body. This is textual, not data-flow: a lambda that
//! only copies the value still gets flagged, and aliased or destructured
//! names are missed.
//!
//! The body comes from the brace-matched extraction in [`crate::loops`].
//! Only an unterminated body (missing close brace) is narrowed to the first
//! [`FALLBACK_WINDOW`] chars, so a broken file does not drag the whole rest
//! of the input into one loop.

use crate::loops::{loop_sites, LoopBody, LoopSite};
use crate::models::{Issue, IssueKind};
use regex::Regex;
use std::sync::OnceLock;

/// Chars inspected after the header when the body is unterminated.
pub const FALLBACK_WINDOW: usize = 2000;

const LAMBDA_ARROW: &str = "=>";

fn int_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:int|uint|long|ulong|short|ushort|byte|sbyte)\s+([A-Za-z_]\w*)")
            .expect("int declaration pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A loop whose variable is likely captured by a lambda.
pub struct Suspicion<'a> {
    pub variable: &'a str,
    pub line: usize,
}

impl Suspicion<'_> {
    pub fn issue(&self) -> Issue {
        Issue::new(
            IssueKind::ClosureCaptureSuspected,
            format!(
                "possible closure capture in for-loop at line {} (check lambdas referencing \"{}\")",
                self.line, self.variable
            ),
        )
    }
}

/// Integer-typed variable declared in a loop header, if any.
pub fn loop_variable(header: &str) -> Option<&str> {
    int_decl_re()
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `name` occurs in `text` as a whole word.
pub fn references(text: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    text.match_indices(name).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + name.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Text of `body` the heuristic searches.
pub fn search_text<'a>(body: &LoopBody<'a>) -> &'a str {
    match *body {
        LoopBody::Unterminated(s) => match s.char_indices().nth(FALLBACK_WINDOW) {
            Some((cut, _)) => &s[..cut],
            None => s,
        },
        LoopBody::Block(s) | LoopBody::Statement(s) => s,
    }
}

/// Name of the captured variable when `header`/`body` look suspicious.
pub fn assess<'a>(header: &'a str, body: &LoopBody<'_>) -> Option<&'a str> {
    let var = loop_variable(header)?;
    let text = search_text(body);
    (text.contains(LAMBDA_ARROW) && references(text, var)).then_some(var)
}

/// Assess one loop site.
pub fn suspect<'a>(site: &LoopSite<'a>) -> Option<Suspicion<'a>> {
    assess(site.header, &site.body).map(|variable| Suspicion {
        variable,
        line: site.line,
    })
}

/// Closure-capture issues for every suspicious loop in `raw`.
pub fn scan_captures(raw: &str) -> Vec<Issue> {
    loop_sites(raw)
        .filter_map(|site| suspect(&site))
        .map(|s| s.issue())
        .collect()
}
