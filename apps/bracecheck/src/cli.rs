//! CLI argument parsing via `clap`.

use crate::output::OutputMode;
use crate::trace::Delimiter;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bracecheck",
    version,
    about = "Structural sanity checks for curly-brace sources",
    long_about = "bracecheck — a small, fast pre-commit/CI scanner for C#-style sources.\n\nReports unbalanced braces/parens, odd quote counts, TODO/FIXME markers, and for-loop variables captured by lambdas.\n\nConfiguration precedence: CLI > bracecheck.toml > defaults.",
    after_help = "Examples:\n  bracecheck scan\n  bracecheck scan Assets/Scripts --strict-quotes\n  bracecheck loops Assets/Scripts/UI/Menu.cs\n  bracecheck trace Assets/Scripts/UI/Menu.cs --delim brace",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current bracecheck version.")]
    Version,
    /// Scan files for structural anomalies
    #[command(
        about = "Run all checks",
        long_about = "Strip comments and literals, then check brace/paren balance, quote parity, work markers, and closure capture in for-loops. Without paths, every matching file under the repository root is scanned. Exits 1 when any issue is found.",
        after_help = "Examples:\n  bracecheck scan\n  bracecheck scan src/Player.cs --output json"
    )]
    Scan {
        #[arg(help = "Files or directories to scan (default: discover under the repo root)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Also flag an odd number of single quotes")]
        strict_quotes: bool,
        #[arg(long, value_enum, help = "Output mode: human|json (default: human)")]
        output: Option<OutputMode>,
    },
    /// List for-loops and closure-capture suspicions per file
    #[command(
        about = "Inspect for-loops",
        long_about = "Show every for-loop header with its body kind, and whether a lambda in the body references the loop variable.",
        after_help = "Examples:\n  bracecheck loops src/Menu.cs src/Grid.cs"
    )]
    Loops {
        #[arg(required = true, help = "Files to inspect")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_enum, help = "Output mode: human|json (default: human)")]
        output: Option<OutputMode>,
    },
    /// Trace one delimiter's running balance line by line
    #[command(
        about = "Trace delimiter balance",
        long_about = "Count one delimiter type literally (comments and strings included) and report the first line where the balance goes negative, or the final balance.",
        after_help = "Examples:\n  bracecheck trace src/Menu.cs\n  bracecheck trace src/Menu.cs --delim brace"
    )]
    Trace {
        #[arg(required = true, help = "Files to trace")]
        paths: Vec<String>,
        #[arg(long, value_enum, help = "Delimiter to trace (default: paren)")]
        delim: Option<Delimiter>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_enum, help = "Output mode: human|json (default: human)")]
        output: Option<OutputMode>,
    },
}
