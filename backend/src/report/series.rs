//! Chart-ready series
//!
//! Ratio series start at period 1; the opening snapshot has no outflow so
//! its LCR is not meaningful. Equity and asset series include period 0.

use crate::models::books::AssetBook;
use crate::models::snapshot::SimulationResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    pub period: usize,
    pub lcr: f64,
    pub nsfr: f64,
}

/// LCR and NSFR per simulated period
pub fn ratio_series(result: &SimulationResult) -> Vec<RatioPoint> {
    result
        .snapshots()
        .iter()
        .filter(|s| !s.is_opening())
        .map(|s| RatioPoint {
            period: s.period,
            lcr: s.lcr,
            nsfr: s.nsfr,
        })
        .collect()
}

/// `(period, equity)` including the opening book
pub fn equity_path(result: &SimulationResult) -> Vec<(usize, f64)> {
    result
        .snapshots()
        .iter()
        .map(|s| (s.period, s.equity))
        .collect()
}

/// `(period, closing assets)` including the opening book
pub fn asset_depletion(result: &SimulationResult) -> Vec<(usize, AssetBook)> {
    result
        .snapshots()
        .iter()
        .map(|s| (s.period, s.closing_assets))
        .collect()
}
