//! Fisher's exact test on a 2x2 table.

use serde::Serialize;
use statrs::stats_tests::{Alternative, fishers_exact};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FisherResult {
    /// Two-sided p-value.
    pub p_value: f64,
    /// Sample odds ratio `(a*d)/(b*c)`. Infinite when only the denominator
    /// is zero, `None` when both products are zero.
    pub odds_ratio: Option<f64>,
}

/// Two-sided Fisher exact test for `[[a, b], [c, d]]`. A table with an
/// empty row or column has `p = 1`.
pub fn fisher_exact(table: [[u64; 2]; 2]) -> Result<FisherResult> {
    let [[a, b], [c, d]] = table;
    let p_value = fishers_exact(&[a, b, c, d], Alternative::TwoSided)
        .map_err(|e| Error::Stats(e.to_string()))?;
    Ok(FisherResult {
        // upper tails come out as `1 - cdf`, which can dip below zero
        p_value: p_value.max(0.0),
        odds_ratio: odds_ratio(a, b, c, d),
    })
}

fn odds_ratio(a: u64, b: u64, c: u64, d: u64) -> Option<f64> {
    let num = a as f64 * d as f64;
    let den = b as f64 * c as f64;
    match (num == 0.0, den == 0.0) {
        (true, true) => None,
        (false, true) => Some(f64::INFINITY),
        _ => Some(num / den),
    }
}
