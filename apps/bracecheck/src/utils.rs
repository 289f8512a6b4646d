//! Supporting helpers: colored stderr prefixes and display paths.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_enabled() {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// `path` relative to `root` when it lives underneath it, else as given.
pub fn display_path(root: &Path, path: &Path) -> String {
    match pathdiff::diff_paths(path, root) {
        Some(rel) if !rel.as_os_str().is_empty() && !rel.starts_with("..") => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string_lossy().to_string(),
    }
}
