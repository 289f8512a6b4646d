//! Scan runner: per-file pipeline, file discovery, and run aggregation.
//!
//! The per-file entry points (`scan_text`, `inspect_loops`) are pure. The
//! `run_*` functions read files in parallel, decode them lossily, and return
//! results together with human-readable read errors.

use crate::balance::{check_balance, QuotePolicy};
use crate::capture::{scan_captures, suspect};
use crate::loops::loop_sites;
use crate::markers::MarkerSet;
use crate::models::{Issue, LoopEntry, LoopReport, RunReport, ScanResult, TraceReport};
use crate::strip::strip;
use crate::trace::{trace, Delimiter};
use crate::utils::display_path;
use glob::{glob, Pattern};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default)]
/// Options for the full scan pipeline.
pub struct ScanOptions {
    pub quotes: QuotePolicy,
    pub markers: MarkerSet,
}

/// Run every check over one file's text.
///
/// Issue order: balance checks, markers, then closure captures in source
/// order.
pub fn scan_text(raw: &str, opts: &ScanOptions) -> Vec<Issue> {
    let stripped = strip(raw);
    let mut issues = check_balance(raw, &stripped, opts.quotes);
    issues.extend(opts.markers.check(raw));
    issues.extend(scan_captures(raw));
    issues
}

/// Loop diagnostic entries for one file's text.
pub fn inspect_loops(raw: &str) -> Vec<LoopEntry> {
    loop_sites(raw)
        .map(|site| LoopEntry {
            line: site.line,
            header: site.header.to_string(),
            body: site.body.kind(),
            suspected: suspect(&site).map(|s| s.variable.to_string()),
        })
        .collect()
}

/// Read a file as text, replacing invalid UTF-8 with U+FFFD.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn in_git_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(n) if n == ".git"))
}

/// Find files under `root` with one of `extensions`, minus `exclude` globs.
///
/// Exclude patterns are matched against the path relative to `root`. Paths
/// inside `.git` are always skipped. The result is sorted and de-duplicated.
pub fn discover(root: &Path, extensions: &[String], exclude: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut errors = Vec::new();
    let excludes: Vec<Pattern> = exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pat) => Some(pat),
            Err(e) => {
                errors.push(format!("invalid exclude pattern '{}': {}", p, e));
                None
            }
        })
        .collect();
    let base = Pattern::escape(&root.to_string_lossy());
    let mut found = BTreeSet::new();
    for ext in extensions {
        let pattern = format!("{}/**/*.{}", base, ext);
        let entries = match glob(&pattern) {
            Ok(entries) => entries,
            Err(e) => {
                errors.push(format!("invalid extension '{}': {}", ext, e));
                continue;
            }
        };
        for entry in entries {
            let path = match entry {
                Ok(p) => p,
                Err(e) => {
                    errors.push(e.to_string());
                    continue;
                }
            };
            if !path.is_file() || in_git_dir(&path) {
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(&path);
            if excludes.iter().any(|p| p.matches_path(rel)) {
                continue;
            }
            found.insert(path);
        }
    }
    (found.into_iter().collect(), errors)
}

/// Expand CLI targets: directories are discovered, files are kept as given.
pub fn expand_targets(
    targets: &[String],
    extensions: &[String],
    exclude: &[String],
) -> (Vec<PathBuf>, Vec<String>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for t in targets {
        let p = PathBuf::from(t);
        if p.is_dir() {
            let (mut found, mut errs) = discover(&p, extensions, exclude);
            files.append(&mut found);
            errors.append(&mut errs);
        } else {
            files.push(p);
        }
    }
    (files, errors)
}

// Applies `f` to each readable file in parallel; input order is preserved.
fn per_file<T, F>(root: &Path, files: &[PathBuf], f: F) -> (Vec<T>, Vec<String>)
where
    T: Send,
    F: Fn(String, &str) -> T + Sync,
{
    let outcomes: Vec<Result<T, String>> = files
        .par_iter()
        .map(|path| {
            let shown = display_path(root, path);
            match read_source(path) {
                Ok(raw) => Ok(f(shown, &raw)),
                Err(e) => Err(format!("cannot read {}: {}", shown, e)),
            }
        })
        .collect();
    let mut results = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for o in outcomes {
        match o {
            Ok(v) => results.push(v),
            Err(e) => errors.push(e),
        }
    }
    (results, errors)
}

/// Scan `files` and aggregate a run report.
pub fn run_scan(root: &Path, files: &[PathBuf], opts: &ScanOptions) -> (RunReport, Vec<String>) {
    let (results, errors) = per_file(root, files, |path, raw| ScanResult {
        path,
        issues: scan_text(raw, opts),
    });
    (RunReport::from_results(results), errors)
}

/// Loop diagnostics for `files`.
pub fn run_loops(root: &Path, files: &[PathBuf]) -> (Vec<LoopReport>, Vec<String>) {
    per_file(root, files, |path, raw| LoopReport {
        path,
        loops: inspect_loops(raw),
    })
}

/// Line-balance traces for `files`.
pub fn run_trace(root: &Path, files: &[PathBuf], delimiter: Delimiter) -> (Vec<TraceReport>, Vec<String>) {
    per_file(root, files, |path, raw| TraceReport {
        path,
        delimiter,
        outcome: trace(raw, delimiter),
    })
}
