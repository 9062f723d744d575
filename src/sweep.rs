//! Parameter sweeps behind the propensity plots.
//!
//! For one shared set: every direction set x plotted area, gaps `1..=max_gap`.
//! Configurations are independent, so they run on the rayon pool; results are
//! collected in sweep order so the output never depends on scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::association::{ContingencyTable, SwitchTester, TestConfig};
use crate::error::{Error, Result};
use crate::tags::{Area, DirectionSet, SharedSet};

/// Gaps drawn on the x-axis by default.
pub const DEFAULT_MAX_GAP: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub gap: usize,
    pub relative_rate: f64,
    pub p_value: f64,
    pub odds_ratio: Option<f64>,
    pub significant: bool,
    pub table: ContingencyTable,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub directions: DirectionSet,
    pub area: Area,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedSweep {
    #[serde(skip)]
    pub shared: SharedSet,
    pub shared_label: String,
    pub series: Vec<Series>,
}

pub fn series_name(directions: DirectionSet, area: Area) -> String {
    format!("{} {} Shared", directions.label(), area.label())
}

/// Run all plotted (direction, area) lines for one shared set.
pub fn sweep(tester: &SwitchTester, shared: SharedSet, max_gap: usize) -> Result<SharedSweep> {
    if max_gap == 0 {
        return Err(Error::InvalidGap(max_gap));
    }
    let lines: Vec<(DirectionSet, Area)> = DirectionSet::ALL
        .into_iter()
        .flat_map(|d| Area::PLOTTED.into_iter().map(move |a| (d, a)))
        .collect();
    let configs: Vec<TestConfig> = lines
        .iter()
        .flat_map(|&(directions, area)| {
            (1..=max_gap).map(move |gap| TestConfig {
                gap,
                area,
                shared,
                directions,
            })
        })
        .collect();

    let results = configs
        .par_iter()
        .map(|config| tester.test(config))
        .collect::<Result<Vec<_>>>()?;

    let series = lines
        .iter()
        .zip(results.chunks(max_gap))
        .map(|(&(directions, area), chunk)| Series {
            name: series_name(directions, area),
            directions,
            area,
            points: chunk
                .iter()
                .enumerate()
                .map(|(i, r)| SeriesPoint {
                    gap: i + 1,
                    relative_rate: r.relative_rate,
                    p_value: r.p_value,
                    odds_ratio: r.odds_ratio,
                    significant: r.significant(),
                    table: r.table,
                })
                .collect(),
        })
        .collect();

    Ok(SharedSweep {
        shared,
        shared_label: shared.label(),
        series,
    })
}

/// [`sweep`] for each preset shared set, in plot order.
pub fn sweep_all(tester: &SwitchTester, max_gap: usize) -> Result<Vec<SharedSweep>> {
    SharedSet::PLOTTED
        .into_iter()
        .map(|shared| sweep(tester, shared, max_gap))
        .collect()
}
