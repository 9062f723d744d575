//! Relative-rate line charts, one SVG per shared set.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::export::timestamped_path;
use crate::sweep::SharedSweep;
use crate::tags::NULL_RATE;

const PLOT_SIZE: (u32, u32) = (1400, 900);
const TITLE: &str = "Relative Switching Propensity as a Function of Distance";

/// Draw `sweep` as `<stem>_<timestamp>_rr_<shared>.svg` in `out_dir`.
pub fn write_plot(sweep: &SharedSweep, corpus_name: &str, stem: &str, out_dir: &Path) -> Result<PathBuf> {
    let kind = format!("rr_{}", sweep.shared.slug());
    let path = timestamped_path(out_dir, stem, &kind, "svg");
    render_plot(&path, corpus_name, sweep)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

pub fn render_plot(path: &Path, corpus_name: &str, sweep: &SharedSweep) -> Result<()> {
    draw(path, corpus_name, sweep).map_err(|e| Error::Plot(e.to_string()))
}

fn draw(path: &Path, corpus_name: &str, sweep: &SharedSweep) -> std::result::Result<(), Box<dyn StdError>> {
    let max_gap = sweep
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.gap))
        .max()
        .unwrap_or(1);
    let y_max = sweep
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.relative_rate))
        .fold(NULL_RATE, f64::max)
        * 1.1;
    let x_range = 0.75..(max_gap as f64 + 0.25);

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(TITLE, ("sans-serif", 28))?;

    let subtitle = format!("Corpus: {corpus_name}; Shared Items: {}", sweep.shared_label);
    let mut chart = ChartBuilder::on(&root)
        .caption(subtitle, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Distance (#tokens)")
        .y_desc("Relative switching propensity")
        .x_labels(max_gap)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x_range.start, NULL_RATE), (x_range.end, NULL_RATE)],
        BLACK.stroke_width(1),
    )))?;

    for series in &sweep.series {
        let (r, g, b) = series.directions.color();
        let color = RGBColor(r, g, b);
        let style = color.stroke_width(4);
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.gap as f64, p.relative_rate))
            .collect();

        let anno = if series.area.dashed() {
            chart.draw_series(DashedLineSeries::new(points, 12, 8, style))?
        } else {
            chart.draw_series(LineSeries::new(points, style))?
        };
        anno.label(series.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], style));

        // significant points in the line color, the rest as black triangles
        chart.draw_series(
            series
                .points
                .iter()
                .filter(|p| p.significant)
                .map(|p| Circle::new((p.gap as f64, p.relative_rate), 5, color.filled())),
        )?;
        chart.draw_series(
            series
                .points
                .iter()
                .filter(|p| !p.significant)
                .map(|p| TriangleMarker::new((p.gap as f64, p.relative_rate), 7, BLACK.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
