use serde::Serialize;

use crate::services::histogram::HistogramBucket;
use crate::services::percentiles::PercentileBand;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthlyCashBand {
    pub month: u32,
    /// Calendar month (`YYYY-MM`) when the scenario has an opening date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SensitivityEntry {
    pub variable: String,
    /// Dollars per week.
    pub weekly_impact: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub scenario: String,
    pub seed: Option<u64>,
    pub iterations: usize,
    pub periods: u32,
    pub monthly_loan_payment: f64,
    pub survival_pct: f64,
    pub insolvency_pct: f64,
    pub insolvency_mean_month: Option<f64>,
    pub weekly_profit: PercentileBand,
    pub weekly_profit_mean: f64,
    /// Share of iterations reaching non-negative cash within the horizon.
    pub break_even_pct: f64,
    pub break_even_month: PercentileBand,
    pub histogram: Vec<HistogramBucket>,
    pub cash_flow_bands: Vec<MonthlyCashBand>,
    pub sensitivity: Vec<SensitivityEntry>,
}
