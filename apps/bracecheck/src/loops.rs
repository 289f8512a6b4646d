//! `for`-loop site extraction.
//!
//! [`loop_sites`] walks raw source text and yields each `for (...)` header
//! together with the span of its body. Block bodies are recovered with a
//! brace-depth counter; single-statement bodies run up to the next `;`.
//! Malformed input never fails: a block whose closing brace is missing
//! extends to end of input and is marked [`LoopBody::Unterminated`].

use regex::Regex;
use std::sync::OnceLock;

fn for_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfor\s*\(").expect("for pattern is valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Extracted body of a loop.
pub enum LoopBody<'a> {
    /// Text between the opening brace and its matching close brace.
    Block(&'a str),
    /// Single statement, up to and including its `;`.
    Statement(&'a str),
    /// Opening brace without a match; runs to end of input.
    Unterminated(&'a str),
}

impl<'a> LoopBody<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            LoopBody::Block(s) | LoopBody::Statement(s) | LoopBody::Unterminated(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LoopBody::Block(_) => "block",
            LoopBody::Statement(_) => "statement",
            LoopBody::Unterminated(_) => "unterminated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A loop header with its body.
pub struct LoopSite<'a> {
    /// Text between the header's outer parentheses.
    pub header: &'a str,
    pub body: LoopBody<'a>,
    /// 1-based line of the `for` keyword.
    pub line: usize,
}

#[derive(Debug, Clone)]
/// Lazy iterator over loop sites; clone it to restart from the same point.
pub struct LoopSites<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    line_pos: usize,
}

/// Iterate over every `for` loop site in `text`, in source order.
pub fn loop_sites(text: &str) -> LoopSites<'_> {
    LoopSites {
        text,
        pos: 0,
        line: 1,
        line_pos: 0,
    }
}

impl<'a> LoopSites<'a> {
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.text.as_bytes()[self.line_pos..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.line_pos = offset;
        self.line
    }
}

impl<'a> Iterator for LoopSites<'a> {
    type Item = LoopSite<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let m = for_re().find_at(self.text, self.pos)?;
            let open = m.end() - 1;
            let Some(close) = matching_close(self.text, open, b'(', b')') else {
                // Header never closes; keep looking after this keyword.
                self.pos = m.end();
                continue;
            };
            let line = self.line_at(m.start());
            // Resume right after the header so nested loops are visited too.
            self.pos = close + 1;
            return Some(LoopSite {
                header: &self.text[open + 1..close],
                body: extract_body(self.text, close + 1),
                line,
            });
        }
    }
}

/// Index of the delimiter closing the one at `open_at`, by depth counting.
pub fn matching_close(text: &str, open_at: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (j, &b) in text.as_bytes().iter().enumerate().skip(open_at) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(j);
            }
        }
    }
    None
}

/// Extract the body that starts at `from` (just after a loop header).
pub fn extract_body(text: &str, from: usize) -> LoopBody<'_> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'{' {
        return match matching_close(text, i, b'{', b'}') {
            Some(j) => LoopBody::Block(&text[i + 1..j]),
            None => LoopBody::Unterminated(&text[i + 1..]),
        };
    }
    match bytes[i..].iter().position(|&b| b == b';') {
        Some(k) => LoopBody::Statement(&text[i..=i + k]),
        None => LoopBody::Statement(&text[i..]),
    }
}
