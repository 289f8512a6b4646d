//! Work-marker detection (`TODO`, `FIXME`, ...).
//!
//! Markers are matched case-sensitively on raw text; comments are exactly
//! where they are expected to live, so no stripping happens here.

use crate::models::{Issue, IssueKind};
use regex::Regex;

pub const DEFAULT_MARKERS: [&str; 2] = ["TODO", "FIXME"];

#[derive(Debug, Clone)]
/// A compiled set of marker tokens.
pub struct MarkerSet {
    tokens: Vec<String>,
    re: Option<Regex>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet::new(DEFAULT_MARKERS.iter().copied())
    }
}

impl MarkerSet {
    /// Build a set from tokens; blank tokens are ignored.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let re = if tokens.is_empty() {
            None
        } else {
            let alt = tokens
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&alt).ok()
        };
        MarkerSet { tokens, re }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of marker occurrences in `raw`.
    pub fn count(&self, raw: &str) -> usize {
        self.re.as_ref().map_or(0, |re| re.find_iter(raw).count())
    }

    /// A `marker-found` issue carrying the count, when any marker is present.
    pub fn check(&self, raw: &str) -> Option<Issue> {
        let n = self.count(raw);
        (n > 0).then(|| {
            Issue::new(
                IssueKind::MarkerFound,
                format!("contains {} ({})", self.tokens.join("/"), n),
            )
        })
    }
}
