//! Plain-text corpus report.

use std::path::{Path, PathBuf};

use crate::corpus::Corpus;
use crate::counter::{ReportTotals, count_all};
use crate::error::{Error, Result};
use crate::export::{timestamped_path, write_text};
use crate::tags::{Direction, Language, SharedKind};

/// Render the report text. Percentages need at least one token.
pub fn render_report(name: &str, totals: &ReportTotals) -> Result<String> {
    if totals.tokens == 0 {
        return Err(Error::EmptyCorpus);
    }
    let mut text = String::new();
    text.push_str(&format!("{name} Report\n\n"));
    text.push_str(&format!("Number of sentences in corpus: {}\n\n", totals.sentences));
    text.push_str(&format!("Number of tokens in corpus: {}\n\n", totals.tokens));

    text.push_str("CS instances:\n");
    text.push_str(&format!("Both Directions: {}\n", totals.switches_both));
    for direction in [Direction::EnglishToSecond, Direction::SecondToEnglish] {
        text.push_str(&format!("{}: {}\n", direction.label(), totals.switches(direction)));
    }

    text.push_str("\nNumber of \"Shared\" tokens:\n");
    for kind in SharedKind::ALL {
        text.push_str(&format!("{}: {}\n", kind.label(), totals.shared(kind)));
    }
    text.push_str(&format!("All Shared: {}", totals.all_shared()));

    text.push_str("\n\nNumber of tokens and percentages:\n");
    for language in Language::ALL {
        let count = totals.language(language);
        let pct = format_pct(percentage(count, totals.tokens));
        text.push_str(&format!("{}: {}  {}% \n", language.label(), count, pct));
    }
    Ok(text)
}

/// Share of `total`, in percent.
pub fn percentage(count: u64, total: u64) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Two decimals, ties to even, trailing zeros dropped but one fractional
/// digit kept (`50.0`, `12.5`, `33.33`).
pub fn format_pct(pct: f64) -> String {
    let fixed = format!("{pct:.2}");
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Count, render and write the report for `corpus` into `out_dir`.
pub fn write_report(corpus: &Corpus, name: &str, stem: &str, out_dir: &Path) -> Result<PathBuf> {
    let totals = count_all(corpus);
    let text = render_report(name, &totals)?;
    let path = timestamped_path(out_dir, stem, "report", "txt");
    write_text(&path, &text)?;
    Ok(path)
}
