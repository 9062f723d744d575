#![forbid(unsafe_code)]
//! # cs_shared
//!
//! Statistics over code-switched conversation corpora annotated with
//! per-token language tags.
//!
//! Two analyses share one corpus format:
//! - **Report**: sentence/token counts, annotated switches per direction,
//!   shared-token tallies and per-language percentages ([`write_report`]).
//! - **Switching propensity**: for each shared set, direction and window,
//!   a Fisher exact test and relative rate of "switch within `gap` tokens"
//!   for shared vs. non-shared tokens ([`SwitchTester`], [`sweep_all`]),
//!   exported as a table and drawn as SVG charts.
//!
//! ## Example
//! ```
//! use cs_shared::{Corpus, count_all};
//!
//! let corpus = Corpus::from_json_str(r#"{"c1": [{"langs": ["1","1","0","0"], "cs": [1]}]}"#).unwrap();
//! let totals = count_all(&corpus);
//! assert_eq!(totals.tokens, 4);
//! assert_eq!(totals.switches_both, 1);
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

pub mod association;
pub mod corpus;
pub mod counter;
pub mod error;
pub mod export;
pub mod normalize;
pub mod plot;
pub mod report;
pub mod stats;
pub mod sweep;
pub mod switches;
pub mod tags;

pub use association::{ContingencyTable, SwitchTester, TestConfig, TestResult, near_switch};
pub use corpus::{Corpus, Utterance};
pub use counter::{ReportTotals, count_all, merge_shared_expressions};
pub use error::{Error, Result};
pub use export::{ExportFormat, export_sweeps, render_sweeps};
pub use normalize::normalize;
pub use plot::{render_plot, write_plot};
pub use report::{render_report, write_report};
pub use stats::{FisherResult, fisher_exact};
pub use sweep::{DEFAULT_MAX_GAP, Series, SeriesPoint, SharedSweep, sweep, sweep_all};
pub use switches::{detect_switches, suppress_adjacent, switch_events};
pub use tags::{Area, Direction, DirectionSet, Language, SharedKind, SharedSet, Tag};

/// Options for the switching-propensity run.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Largest window size; gaps `1..=max_gap` are tested.
    pub max_gap: usize,
    pub export_format: ExportFormat,
    /// Draw one SVG chart per shared set.
    pub plots: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            max_gap: DEFAULT_MAX_GAP,
            export_format: ExportFormat::Txt,
            plots: true,
        }
    }
}

/// Files written by one switching run.
#[derive(Debug, Clone)]
pub struct SwitchingOutput {
    pub table: PathBuf,
    pub plots: Vec<PathBuf>,
    pub sweeps: Vec<SharedSweep>,
}

/// Collect corpus files: a file is returned as-is, a directory is walked
/// for `*.json` files (sorted).
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|x| x.to_str())
                .is_some_and(|x| x.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    files
}

/// File stem used as the output prefix (`reddit_corpus.json` -> `reddit_corpus`).
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string())
}

/// Display name derived from a file stem: first word, capitalized
/// (`reddit_corpus` -> `Reddit`).
pub fn display_name(stem: &str) -> String {
    let first = stem.split(['_', '-', ' ']).find(|s| !s.is_empty()).unwrap_or(stem);
    let mut chars = first.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Load a corpus file and write its report. `name` defaults to
/// `"<Display> Corpus"`.
pub fn report_file(path: &Path, name: Option<&str>, out_dir: &Path) -> Result<PathBuf> {
    let corpus = Corpus::load(path)?;
    let stem = file_stem(path);
    let name = match name {
        Some(n) => n.to_string(),
        None => format!("{} Corpus", display_name(&stem)),
    };
    write_report(&corpus, &name, &stem, out_dir)
}

/// Load a corpus file, run every sweep, export the table and (optionally)
/// the charts.
pub fn switching_file(
    path: &Path,
    name: Option<&str>,
    out_dir: &Path,
    options: &SweepOptions,
) -> Result<SwitchingOutput> {
    let corpus = Corpus::load(path)?;
    let stem = file_stem(path);
    let name = name.map(str::to_string).unwrap_or_else(|| display_name(&stem));

    let tester = SwitchTester::new(&corpus)?;
    info!("{}: {} interior tokens", name, tester.interior_tokens());
    let sweeps = sweep_all(&tester, options.max_gap)?;

    let table = export_sweeps(&sweeps, options.export_format, &stem, out_dir)?;
    let plots = if options.plots {
        sweeps
            .iter()
            .map(|s| write_plot(s, &name, &stem, out_dir))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };
    Ok(SwitchingOutput {
        table,
        plots,
        sweeps,
    })
}
