//! Configuration discovery and effective settings resolution.
//!
//! bracecheck reads `bracecheck.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `strict_quotes`: false
//! - `extensions`: `["cs"]`
//! - `markers`: `["TODO", "FIXME"]`
//! - `exclude`: none
//! - `trace.delimiter`: `paren`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::balance::QuotePolicy;
use crate::markers::{MarkerSet, DEFAULT_MARKERS};
use crate::output::OutputMode;
use crate::trace::Delimiter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["bracecheck.toml", "bracecheck.yaml", "bracecheck.yml"];

pub const DEFAULT_EXTENSIONS: [&str; 1] = ["cs"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Line-balance tracing section under `[trace]`.
pub struct TraceCfg {
    pub delimiter: Option<Delimiter>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `bracecheck.toml|yaml`.
pub struct BracecheckConfig {
    pub output: Option<OutputMode>,
    pub strict_quotes: Option<bool>,
    pub extensions: Option<Vec<String>>,
    pub markers: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    pub trace: Option<TraceCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: OutputMode,
    pub quotes: QuotePolicy,
    pub extensions: Vec<String>,
    pub markers: MarkerSet,
    pub exclude: Vec<String>,
    pub delimiter: Delimiter,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `bracecheck.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) if !p.as_os_str().is_empty() => cur = p,
            _ => return start.to_path_buf(),
        }
    }
}

/// First config file present under `root`, in lookup order.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load `BracecheckConfig` from `root`. `None` when absent or unparsable.
pub fn load_config(root: &Path) -> Option<BracecheckConfig> {
    let path = config_path(root)?;
    let s = fs::read_to_string(&path).ok()?;
    if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&s).ok()
    } else {
        serde_yaml::from_str(&s).ok()
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<OutputMode>,
    cli_strict_quotes: Option<bool>,
    cli_delimiter: Option<Delimiter>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let output = cli_output.or(cfg.output).unwrap_or_default();
    let quotes = QuotePolicy::from_strict(
        cli_strict_quotes.or(cfg.strict_quotes).unwrap_or(false),
    );
    let extensions = cfg
        .extensions
        .map(|exts| {
            exts.into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect()
        })
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());
    let markers = match cfg.markers {
        Some(tokens) => MarkerSet::new(tokens),
        None => MarkerSet::new(DEFAULT_MARKERS),
    };
    let exclude = cfg.exclude.unwrap_or_default();
    let delimiter = cli_delimiter
        .or_else(|| cfg.trace.as_ref().and_then(|t| t.delimiter))
        .unwrap_or_default();

    Effective {
        repo_root,
        output,
        quotes,
        extensions,
        markers,
        exclude,
        delimiter,
    }
}
