//! bracecheck core library.
//!
//! This crate exposes programmatic APIs for scanning curly-brace sources
//! (C# by default) for structural anomalies without parsing them.
//!
//! High-level modules:
//! - `strip`: Blank comments and string/char literals, keeping offsets.
//! - `balance`: Brace/paren balance over stripped text, quote parity.
//! - `markers`: Work-marker (`TODO`/`FIXME`) counting.
//! - `loops`: `for`-loop header and body extraction.
//! - `capture`: Loop-variable capture by lambdas heuristic.
//! - `trace`: Per-line running balance of one delimiter type.
//! - `scan`: Per-file pipeline, discovery, and run aggregation.
//! - `models`: Issue, per-file, and run report structs.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod balance;
pub mod capture;
pub mod cli;
pub mod config;
pub mod loops;
pub mod markers;
pub mod models;
pub mod output;
pub mod scan;
pub mod strip;
pub mod trace;
pub mod utils;
