//! Integration tests for `cs_shared`.
//
// This suite verifies:
// - Library behavior (loading, tallies, normalization, switch detection, windowed tests)
// - Report and sweep outputs written to disk
// - CLI behavior including export formats and failure exits
//
// Notes:
// - CLI tests run the binary with a per-process working directory (no global CWD change).

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use serde_json::Value as Json;
use tempfile::tempdir;

use cs_shared::{
    Area, Corpus, Direction, DirectionSet, Error, ExportFormat, Language, SharedSet,
    SweepOptions, SwitchTester, Tag, TestConfig, count_all, normalize, render_report,
    report_file, switching_file,
};

// --------------------- helpers ---------------------

/// Four utterances with switches in both directions and every shared kind
/// at an interior position, so every sweep configuration has a defined rate.
const SAMPLE_CORPUS: &str = r#"{
  "conv_a": [
    {"langs": ["1", "1", "7", "0", "0", "0", "1", "1"], "cs": [1, 2]},
    {"langs": ["0", "6", "1", "1", "1", "4", "1", "0", "0"], "cs": [2, 1]}
  ],
  "conv_b": [
    {"langs": ["1", "2", "1", "7", "1", "0", "6", "0", "1", "1"], "cs": [1, 2]},
    {"langs": ["0", "0", "4", "0", "0", "1", "1", "0", "1"], "cs": [2, 1, 2]}
  ]
}"#;

/// Create a file with content in a temp dir.
fn write_file(dir: &assert_fs::TempDir, name: &str, content: &str) -> PathBuf {
    let f = dir.child(name);
    f.write_str(content).unwrap();
    f.path().to_path_buf()
}

/// Read file to string.
fn read_to_string<P: AsRef<Path>>(p: P) -> String {
    fs::read_to_string(p).unwrap()
}

/// Run CLI successfully with a specific working directory.
fn run_cli_ok_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("cs_shared").unwrap();
    cmd.current_dir(dir);
    cmd.args(args).assert().success()
}

/// Run CLI expecting failure with a specific working directory.
fn run_cli_fail_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("cs_shared").unwrap();
    cmd.current_dir(dir);
    cmd.args(args).assert().failure()
}

/// Files in `dir` whose name matches `pattern`.
fn files_matching(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let re = Regex::new(pattern).unwrap();
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| re.is_match(e.file_name().to_string_lossy().as_ref()))
        .map(|e| e.path())
        .collect();
    found.sort();
    found
}

fn all_config(gap: usize, area: Area) -> TestConfig {
    TestConfig {
        gap,
        area,
        shared: SharedSet::ALL_SHARED,
        directions: DirectionSet::Both,
    }
}

// --------------------- library tests ---------------------

#[test]
fn lib_single_utterance_counts() {
    let corpus = Corpus::from_json_str(r#"{"c1": [{"langs": ["1","1","0","0"], "cs": [1]}]}"#).unwrap();
    let totals = count_all(&corpus);
    assert_eq!(totals.tokens, 4);
    assert_eq!(totals.language(Language::English), 2);
    assert_eq!(totals.language(Language::Arabizi), 2);
    assert_eq!(totals.switches(Direction::EnglishToSecond), 1);
    assert_eq!(totals.switches_both, 1);
}

#[test]
fn lib_normalizer_collapses_and_absorbs() {
    let tags = Tag::parse_all(&["7", "7", "4", "0"]);
    assert_eq!(normalize(&tags).unwrap(), Tag::parse_all(&["7", "0"]));
}

#[test]
fn lib_sample_totals() {
    let corpus = Corpus::from_json_str(SAMPLE_CORPUS).unwrap();
    let totals = count_all(&corpus);
    assert_eq!(totals.sentences, 4);
    assert_eq!(totals.tokens, 36);
    assert_eq!(totals.switches_both, 9);
    assert_eq!(totals.switches(Direction::EnglishToSecond), 4);
    assert_eq!(totals.switches(Direction::SecondToEnglish), 5);
    assert_eq!(totals.all_shared(), 6);
    let categorized: u64 = Language::ALL.iter().map(|&l| totals.language(l)).sum();
    assert_eq!(categorized + totals.uncategorized, totals.tokens);
}

#[test]
fn lib_zero_token_corpus_is_rejected() {
    let corpus = Corpus::from_json_str(r#"{"c": []}"#).unwrap();
    let totals = count_all(&corpus);
    assert!(matches!(render_report("Empty", &totals), Err(Error::EmptyCorpus)));
}

#[test]
fn lib_tables_cover_every_interior_token() {
    let corpus = Corpus::from_json_str(SAMPLE_CORPUS).unwrap();
    let tester = SwitchTester::new(&corpus).unwrap();
    // 8, 9, 10 and 9 tokens; nothing is collapsed by normalization
    assert_eq!(tester.interior_tokens(), 6 + 7 + 8 + 7);
    for gap in 1..=6 {
        for area in [Area::Before, Area::Around, Area::After] {
            let table = tester.count_table(&all_config(gap, area)).unwrap();
            assert_eq!(table.total(), tester.interior_tokens());
        }
    }
}

#[test]
fn lib_around_is_union_of_before_and_after() {
    let corpus = Corpus::from_json_str(SAMPLE_CORPUS).unwrap();
    let tester = SwitchTester::new(&corpus).unwrap();
    for gap in 1..=4 {
        let before = tester.count_table(&all_config(gap, Area::Before)).unwrap();
        let after = tester.count_table(&all_config(gap, Area::After)).unwrap();
        let around = tester.count_table(&all_config(gap, Area::Around)).unwrap();
        let near = |t: &cs_shared::ContingencyTable| t.shared_near + t.other_near;
        assert!(near(&around) >= near(&before).max(near(&after)));
        assert!(near(&around) <= near(&before) + near(&after));
    }
}

#[test]
fn lib_report_written_with_timestamped_name() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit_corpus.json", SAMPLE_CORPUS);
    let path = report_file(&corpus, None, td.path()).expect("report_file");
    let re = Regex::new(r"^reddit_corpus_\d{8}_\d{6}_report\.txt$").unwrap();
    assert!(re.is_match(path.file_name().unwrap().to_string_lossy().as_ref()));
    let text = read_to_string(&path);
    assert!(text.starts_with("Reddit Corpus Report\n\n"));
    assert!(text.contains("Number of tokens in corpus: 36\n"));
    assert!(text.contains("All Shared: 6\n"));
}

#[test]
fn lib_switching_exports_json_and_plots() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "twitter.json", SAMPLE_CORPUS);
    let options = SweepOptions {
        max_gap: 6,
        export_format: ExportFormat::Json,
        plots: true,
    };
    let out = switching_file(&corpus, None, td.path(), &options).expect("switching_file");
    assert_eq!(out.sweeps.len(), 4);
    assert_eq!(out.plots.len(), 4);
    for sweep in &out.sweeps {
        assert_eq!(sweep.series.len(), 6);
        for series in &sweep.series {
            assert_eq!(series.points.len(), 6);
        }
    }

    let v: Json = serde_json::from_str(&read_to_string(&out.table)).expect("valid json");
    let labels: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["shared_label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["All Shared Items", "Shared-English", "Shared-Arabic", "Shared-Other"]
    );
    assert_eq!(files_matching(td.path(), r"^twitter_\d{8}_\d{6}_rr_.+\.svg$").len(), 4);
}

#[test]
fn lib_missing_file_is_load_error() {
    let td = tempdir().unwrap();
    let err = report_file(&td.path().join("nope.json"), None, td.path()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

// --------------------- CLI tests ---------------------

#[test]
fn cli_nonexistent_path_fails() {
    let td = tempdir().unwrap();
    let bad = td.path().join("does_not_exist_here");
    run_cli_fail_in(td.path(), &["report", bad.to_string_lossy().as_ref()]);
}

#[test]
fn cli_report_prints_written_path() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit_corpus.json", SAMPLE_CORPUS);

    run_cli_ok_in(
        td.path(),
        &["report", corpus.to_str().unwrap(), "--name", "Reddit Corpus"],
    )
    .stdout(predicate::str::contains("_report.txt"));

    let reports = files_matching(td.path(), r"^reddit_corpus_\d{8}_\d{6}_report\.txt$");
    assert_eq!(reports.len(), 1);
    let text = read_to_string(&reports[0]);
    assert!(text.contains("CS instances:\nBoth Directions: 9\nEnglish->Arabic: 4\nArabic->English: 5\n"));
}

#[test]
fn cli_report_directory_mode() {
    let td = assert_fs::TempDir::new().unwrap();
    let _a = write_file(&td, "reddit.json", SAMPLE_CORPUS);
    let _b = write_file(&td, "twitter.json", SAMPLE_CORPUS);
    let out = td.child("out");
    out.create_dir_all().unwrap();

    run_cli_ok_in(
        td.path(),
        &[
            "report",
            td.path().to_string_lossy().as_ref(),
            "--out",
            out.path().to_str().unwrap(),
        ],
    );
    assert_eq!(files_matching(out.path(), r"_report\.txt$").len(), 2);
    let twitter = files_matching(out.path(), r"^twitter_.*_report\.txt$");
    assert!(read_to_string(&twitter[0]).starts_with("Twitter Corpus Report"));
}

#[test]
fn cli_report_zero_tokens_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "empty.json", r#"{"c": [{"langs": [], "cs": []}]}"#);
    run_cli_fail_in(td.path(), &["report", corpus.to_str().unwrap()]);
    assert!(files_matching(td.path(), r"_report\.txt$").is_empty());
}

#[test]
fn cli_malformed_corpus_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    let bad = write_file(&td, "bad.json", r#"{"c": [{"langs": ["1"]}]}"#);
    run_cli_fail_in(td.path(), &["report", bad.to_str().unwrap()]);
    run_cli_fail_in(td.path(), &["switching", bad.to_str().unwrap()]);
}

#[test]
fn cli_switching_csv_without_plots() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit.json", SAMPLE_CORPUS);

    run_cli_ok_in(
        td.path(),
        &[
            "switching",
            corpus.to_str().unwrap(),
            "--export-format",
            "csv",
            "--max-gap",
            "3",
            "--no-plots",
        ],
    );

    let tables = files_matching(td.path(), r"^reddit_\d{8}_\d{6}_switching\.csv$");
    assert_eq!(tables.len(), 1);
    let text = read_to_string(&tables[0]);
    // header + 4 shared sets * 6 lines * 3 gaps
    assert_eq!(text.lines().count(), 1 + 4 * 6 * 3);
    assert!(text.starts_with("shared,series,gap,relative_rate,p_value"));
    assert!(files_matching(td.path(), r"\.svg$").is_empty());
}

#[test]
fn cli_switching_tsv() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit.json", SAMPLE_CORPUS);
    run_cli_ok_in(
        td.path(),
        &["switching", corpus.to_str().unwrap(), "--export-format", "tsv", "--no-plots"],
    );
    let tables = files_matching(td.path(), r"_switching\.tsv$");
    assert_eq!(tables.len(), 1);
    assert!(read_to_string(&tables[0]).lines().next().unwrap().contains('\t'));
}

#[test]
fn cli_switching_writes_charts() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit.json", SAMPLE_CORPUS);
    run_cli_ok_in(td.path(), &["switching", corpus.to_str().unwrap(), "--name", "Reddit"])
        .stdout(predicate::str::contains(".svg"));
    let charts = files_matching(td.path(), r"^reddit_\d{8}_\d{6}_rr_.+\.svg$");
    assert_eq!(charts.len(), 4);
    assert!(read_to_string(&charts[0]).contains("Corpus: Reddit"));
}

#[test]
fn cli_zero_gap_rejected() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "reddit.json", SAMPLE_CORPUS);
    run_cli_fail_in(
        td.path(),
        &["switching", corpus.to_str().unwrap(), "--max-gap", "0"],
    );
}
