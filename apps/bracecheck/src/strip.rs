//! Comment and literal stripping.
//!
//! `strip` blanks block comments, line comments, string literals and char
//! literals so delimiter counts only see code. Each blanked character turns
//! into one ASCII space while `\n` and `\r` are kept, so char offsets and
//! line numbers in the stripped text match the raw source.
//!
//! Passes run in a fixed order (block comments, line comments, strings,
//! chars). Every pass tokenizes with the same lexeme pattern and only blanks
//! its own kind, so a `//` inside a string or a `"` inside a comment is never
//! mistaken for the start of something else.
//!
//! Edge cases:
//! - An unterminated block comment runs to end of input.
//! - An unterminated string runs to end of its line; only the opening quote
//!   is kept.
//! - An unterminated char literal is left untouched.
//! - A backslash never escapes a line break (`\n` or a lone `\r`), so a
//!   literal cannot continue past the end of its line.
//! - Block comments do not nest: `/* a /* b */ c */` ends at the first `*/`.
//! - Verbatim strings (`@"..."`) are lexed like regular strings, so a
//!   trailing backslash before the closing quote keeps them open to end of
//!   line.

use regex::{Captures, Match, Regex};
use std::sync::OnceLock;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Lexeme {
    BlockComment,
    LineComment,
    Str,
    Char,
}

const PASSES: [Lexeme; 4] = [
    Lexeme::BlockComment,
    Lexeme::LineComment,
    Lexeme::Str,
    Lexeme::Char,
];

fn lexeme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<block>/\*(?s:.*?)(?:\*/|\z))",
            r"|(?P<line>//[^\r\n]*)",
            r#"|(?P<str>"(?:\\[^\r\n]|[^"\\\r\n])*(?P<str_end>")?)"#,
            r"|(?P<chr>'(?:\\[^\r\n]|[^'\\\r\n])+')",
        ))
        .expect("lexeme pattern is valid")
    })
}

fn classify<'t>(caps: &Captures<'t>) -> Option<(Lexeme, Match<'t>)> {
    if let Some(m) = caps.name("block") {
        return Some((Lexeme::BlockComment, m));
    }
    if let Some(m) = caps.name("line") {
        return Some((Lexeme::LineComment, m));
    }
    if let Some(m) = caps.name("str") {
        return Some((Lexeme::Str, m));
    }
    caps.name("chr").map(|m| (Lexeme::Char, m))
}

/// Return `text` with comments and literals blanked.
///
/// The result has the same number of chars as `text` and newlines at the
/// same char positions. Stripping is idempotent.
pub fn strip(text: &str) -> String {
    PASSES
        .iter()
        .fold(text.to_string(), |acc, &kind| blank_pass(&acc, kind))
}

fn blank_pass(text: &str, target: Lexeme) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in lexeme_re().captures_iter(text) {
        let Some((kind, m)) = classify(&caps) else {
            continue;
        };
        if kind != target {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        match kind {
            Lexeme::BlockComment | Lexeme::LineComment => blank_into(&mut out, m.as_str()),
            Lexeme::Str => blank_literal(&mut out, m.as_str(), caps.name("str_end").is_some()),
            Lexeme::Char => blank_literal(&mut out, m.as_str(), true),
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn blank_into(out: &mut String, s: &str) {
    for c in s.chars() {
        if c == '\n' || c == '\r' {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
}

// Keeps the opening quote, and the closing one when the literal is closed.
fn blank_literal(out: &mut String, s: &str, closed: bool) {
    let mut chars = s.chars();
    let Some(open) = chars.next() else {
        return;
    };
    out.push(open);
    let close = if closed { chars.next_back() } else { None };
    blank_into(out, chars.as_str());
    if let Some(c) = close {
        out.push(c);
    }
}
