//! bracecheck CLI binary entry point.
//! Delegates to library modules for scanning and prints results.

use bracecheck::cli::{Cli, Commands};
use bracecheck::config::{self, Effective};
use bracecheck::scan::{self, ScanOptions};
use bracecheck::{output, utils};
use clap::Parser;
use std::path::PathBuf;

// Friendly notes about config discovery; quiet for JSON output.
fn announce_config(eff: &Effective) {
    if eff.output == output::OutputMode::Json {
        return;
    }
    match config::config_path(&eff.repo_root) {
        None => eprintln!(
            "{} No bracecheck.toml found; using defaults.",
            utils::note_prefix()
        ),
        Some(p) if config::load_config(&eff.repo_root).is_none() => eprintln!(
            "{} Could not parse {}; using defaults.",
            utils::warn_prefix(),
            p.to_string_lossy()
        ),
        Some(_) => {}
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            paths,
            repo_root,
            strict_quotes,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                output,
                if strict_quotes { Some(true) } else { None },
                None,
            );
            announce_config(&eff);
            let (files, mut errors): (Vec<PathBuf>, Vec<String>) = if paths.is_empty() {
                scan::discover(&eff.repo_root, &eff.extensions, &eff.exclude)
            } else {
                scan::expand_targets(&paths, &eff.extensions, &eff.exclude)
            };
            if files.is_empty() && eff.output != output::OutputMode::Json {
                eprintln!(
                    "{} No files matched extensions [{}] under {}",
                    utils::info_prefix(),
                    eff.extensions.join(", "),
                    eff.repo_root.to_string_lossy()
                );
            }
            let opts = ScanOptions {
                quotes: eff.quotes,
                markers: eff.markers.clone(),
            };
            let (report, mut read_errors) = scan::run_scan(&eff.repo_root, &files, &opts);
            errors.append(&mut read_errors);
            output::print_scan(&report, eff.output, &errors);
            if !report.passed() {
                std::process::exit(1);
            }
            if !errors.is_empty() {
                std::process::exit(2);
            }
        }
        Commands::Loops {
            paths,
            repo_root,
            output,
        } => {
            let eff = config::resolve_effective(repo_root.as_deref(), output, None, None);
            let files: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
            let (reports, errors) = scan::run_loops(&eff.repo_root, &files);
            output::print_loops(&reports, eff.output, &errors);
            if reports.iter().any(|r| r.loops.iter().any(|l| l.suspected.is_some())) {
                std::process::exit(1);
            }
            if !errors.is_empty() {
                std::process::exit(2);
            }
        }
        Commands::Trace {
            paths,
            delim,
            repo_root,
            output,
        } => {
            let eff = config::resolve_effective(repo_root.as_deref(), output, None, delim);
            let files: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
            let (reports, errors) = scan::run_trace(&eff.repo_root, &files, eff.delimiter);
            output::print_traces(&reports, eff.output, &errors);
            if reports
                .iter()
                .any(|r| r.outcome.issue(r.delimiter).is_some())
            {
                std::process::exit(1);
            }
            if !errors.is_empty() {
                std::process::exit(2);
            }
        }
    }
}
