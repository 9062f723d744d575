//! Output files: timestamped naming plus txt/csv/tsv/json export of sweeps.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use log::info;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::sweep::SharedSweep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// `<out_dir>/<stem>_<YYYYMMDD_HHMMSS>_<kind>.<ext>`
pub fn timestamped_path(out_dir: &Path, stem: &str, kind: &str, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    out_dir.join(format!("{stem}_{stamp}_{kind}.{ext}"))
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// One flattened sweep point.
#[derive(Debug, Serialize)]
struct SweepRow<'a> {
    shared: &'a str,
    series: &'a str,
    gap: usize,
    relative_rate: f64,
    p_value: f64,
    odds_ratio: String,
    significant: bool,
    shared_near: u64,
    shared_far: u64,
    other_near: u64,
    other_far: u64,
}

fn rows(sweeps: &[SharedSweep]) -> impl Iterator<Item = SweepRow<'_>> {
    sweeps.iter().flat_map(|sweep| {
        sweep.series.iter().flat_map(move |series| {
            series.points.iter().map(move |p| SweepRow {
                shared: &sweep.shared_label,
                series: &series.name,
                gap: p.gap,
                relative_rate: p.relative_rate,
                p_value: p.p_value,
                odds_ratio: format_odds(p.odds_ratio),
                significant: p.significant,
                shared_near: p.table.shared_near,
                shared_far: p.table.shared_far,
                other_near: p.table.other_near,
                other_far: p.table.other_far,
            })
        })
    })
}

fn format_odds(odds: Option<f64>) -> String {
    match odds {
        Some(o) if o.is_infinite() => "inf".to_string(),
        Some(o) => format!("{o}"),
        None => "undefined".to_string(),
    }
}

/// Render sweeps in the given format.
pub fn render_sweeps(sweeps: &[SharedSweep], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Txt => Ok(render_txt(sweeps)),
        ExportFormat::Json => serde_json::to_string_pretty(sweeps).map_err(Error::Serialize),
        ExportFormat::Csv => render_delimited(sweeps, b','),
        ExportFormat::Tsv => render_delimited(sweeps, b'\t'),
    }
}

fn render_delimited(sweeps: &[SharedSweep], delimiter: u8) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows(sweeps) {
        wtr.serialize(row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_txt(sweeps: &[SharedSweep]) -> String {
    let mut out = String::new();
    for sweep in sweeps {
        out.push_str(&format!("Shared items: {}\n", sweep.shared_label));
        for series in &sweep.series {
            out.push_str(&format!("  {}\n", series.name));
            out.push_str(&format!(
                "    {:>4} {:>10} {:>12} {:>10}  {}\n",
                "gap", "rr", "p", "odds", "significant"
            ));
            for p in &series.points {
                out.push_str(&format!(
                    "    {:>4} {:>10.4} {:>12.4e} {:>10}  {}\n",
                    p.gap,
                    p.relative_rate,
                    p.p_value,
                    format_odds(p.odds_ratio.map(|o| (o * 1e4).round() / 1e4)),
                    if p.significant { "yes" } else { "no" }
                ));
            }
        }
        out.push('\n');
    }
    out
}

/// Write sweeps to `<stem>_<timestamp>_switching.<ext>` in `out_dir`.
pub fn export_sweeps(
    sweeps: &[SharedSweep],
    format: ExportFormat,
    stem: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let text = render_sweeps(sweeps, format)?;
    let path = timestamped_path(out_dir, stem, "switching", format.extension());
    write_text(&path, &text)?;
    Ok(path)
}
