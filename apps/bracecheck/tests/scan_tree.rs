//! End-to-end scan of a small source tree through the library API.

use bracecheck::config::resolve_effective;
use bracecheck::models::IssueKind;
use bracecheck::output::{compose_scan_json, OutputMode};
use bracecheck::scan::{discover, run_scan, ScanOptions};
use std::fs;
use tempfile::tempdir;

const MENU: &str = r#"using UnityEngine;

public class Menu : MonoBehaviour
{
    // FIXME: pool these
    public Button[] buttons;

    void Start()
    {
        for (int i = 0; i < buttons.Length; i++)
        {
            buttons[i].onClick.AddListener(() => Open(i));
        }
    }

    void Open(int index) { Debug.Log("open {" + index); }
}
"#;

const GRID: &str = r#"public class Grid
{
    /* layout: { rows, cols } */
    public string Label = "{ok}";
    void Build(int n)
    {
        for (int r = 0; r < n; r++)
        {
            cells.Add(() => Fill(n));
        }
    }
"#;

const CLEAN: &str = "public class Ok { char c = '}'; }\n";

#[test]
fn test_scan_tree_with_config() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("bracecheck.toml"),
        "output = \"json\"\nexclude = [\"Library/*\"]\n",
    )
    .unwrap();
    for (rel, body) in [
        ("Assets/UI/Menu.cs", MENU),
        ("Assets/World/Grid.cs", GRID),
        ("Assets/Ok.cs", CLEAN),
        ("Library/Cache.cs", "{{{{"),
        ("notes.txt", "TODO"),
    ] {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }

    let eff = resolve_effective(root.to_str(), None, None, None);
    assert_eq!(eff.output, OutputMode::Json);

    let (files, errors) = discover(&eff.repo_root, &eff.extensions, &eff.exclude);
    assert!(errors.is_empty());
    assert_eq!(files.len(), 3);

    let opts = ScanOptions {
        quotes: eff.quotes,
        markers: eff.markers.clone(),
    };
    let (report, errors) = run_scan(&eff.repo_root, &files, &opts);
    assert!(errors.is_empty());
    assert!(!report.passed());
    assert_eq!(report.summary.files, 3);
    assert_eq!(report.summary.files_with_issues, 2);

    let paths: Vec<_> = report.results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["Assets/UI/Menu.cs", "Assets/World/Grid.cs"]);

    let menu: Vec<_> = report.results[0].issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        menu,
        vec![IssueKind::MarkerFound, IssueKind::ClosureCaptureSuspected]
    );

    // Grid is missing its class close brace; its lambda only uses `n`, not
    // the loop variable, so no capture is suspected.
    let grid = &report.results[1].issues;
    assert_eq!(grid.len(), 1);
    assert_eq!(grid[0].kind, IssueKind::UnbalancedBraces);
    assert_eq!(grid[0].detail, "unbalanced braces: { 3 vs } 2");

    let json = compose_scan_json(&report, &errors);
    assert_eq!(json["summary"]["issues"], 3);
    assert_eq!(json["results"][0]["issues"][1]["kind"], "closure-capture-suspected");
}

#[test]
fn test_strict_quotes_flags_apostrophes() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join("Doc.cs"), "// it's fine\nclass D { }\n").unwrap();

    let lenient = resolve_effective(root.to_str(), None, None, None);
    let strict = resolve_effective(root.to_str(), None, Some(true), None);
    let (files, _) = discover(&lenient.repo_root, &lenient.extensions, &lenient.exclude);

    let opts = |eff: &bracecheck::config::Effective| ScanOptions {
        quotes: eff.quotes,
        markers: eff.markers.clone(),
    };
    let (report, _) = run_scan(&lenient.repo_root, &files, &opts(&lenient));
    assert!(report.passed());
    let (report, _) = run_scan(&strict.repo_root, &files, &opts(&strict));
    assert_eq!(report.summary.issues, 1);
    assert_eq!(report.results[0].issues[0].detail, "odd number of single quotes");
}
