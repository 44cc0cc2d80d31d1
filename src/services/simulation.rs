use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Months;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::scenario::{ConfigError, ScenarioConfig};
use crate::services::histogram::{HISTOGRAM_BUCKETS, bucket_sorted};
use crate::services::percentiles::{PercentileBand, sort_ascending};
use crate::services::roll_forward::{
    IterationTrace, RollForwardError, monthly_loan_payment, simulate_life,
};
use crate::services::scenario_yaml::{ScenarioYamlError, read_scenario_from_yaml_file};
use crate::services::sensitivity::rank_sensitivity;
use crate::services::simulation_types::{MonthlyCashBand, SimulationResult};
use crate::services::triangular_sampler::TriangularSampler;

/// Upper bound on iterations per run to keep interactive runs short.
pub const MAX_ITERATIONS: usize = 2000;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("failed to load scenario: {0}")]
    LoadScenario(#[from] ScenarioYamlError),
    #[error("invalid scenario: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("simulation failed: {0}")]
    Projection(#[from] RollForwardError),
    #[error("simulation aborted")]
    Aborted,
}

/// Caller-side adjustments applied on top of a scenario file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub iterations: Option<usize>,
    pub periods: Option<u32>,
    pub seed: Option<u64>,
}

pub fn simulate_from_scenario_file(
    scenario_path: &str,
    overrides: &RunOverrides,
) -> Result<SimulationResult, SimulationError> {
    // Validated by `run_simulation` once the overrides are in place.
    let mut scenario = read_scenario_from_yaml_file(scenario_path)?;
    if let Some(iterations) = overrides.iterations {
        scenario.iterations = iterations;
    }
    if let Some(periods) = overrides.periods {
        scenario.periods = periods;
    }
    run_simulation(&scenario, overrides.seed)
}

pub fn run_simulation(
    config: &ScenarioConfig,
    seed: Option<u64>,
) -> Result<SimulationResult, SimulationError> {
    let never = AtomicBool::new(false);
    run_simulation_with_abort(config, seed, &never)
}

/// Runs the Monte Carlo simulation, checking `abort` before every iteration.
///
/// Each iteration gets its own `StdRng` seeded from a master stream, so the
/// result for a given seed does not depend on how rayon schedules the work.
pub fn run_simulation_with_abort(
    config: &ScenarioConfig,
    seed: Option<u64>,
    abort: &AtomicBool,
) -> Result<SimulationResult, SimulationError> {
    config.validate()?;

    let iterations = if config.iterations > MAX_ITERATIONS {
        warn!(
            requested = config.iterations,
            max = MAX_ITERATIONS,
            "clamping iteration count"
        );
        MAX_ITERATIONS
    } else {
        config.iterations
    };

    let mut master = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let iteration_seeds: Vec<u64> = (0..iterations).map(|_| master.r#gen()).collect();
    let loan_payment = monthly_loan_payment(&config.capital);

    info!(
        scenario = %config.name,
        iterations,
        periods = config.periods,
        loan_payment,
        "starting simulation"
    );

    let traces = iteration_seeds
        .par_iter()
        .map(|iteration_seed| {
            if abort.load(Ordering::Relaxed) {
                return Err(SimulationError::Aborted);
            }
            let mut sampler = TriangularSampler::new(StdRng::seed_from_u64(*iteration_seed));
            Ok(simulate_life(config, loan_payment, &mut sampler)?)
        })
        .collect::<Result<Vec<IterationTrace>, SimulationError>>()?;

    let mut accumulator = Accumulator::new(config.periods, iterations);
    for trace in traces {
        accumulator.fold(trace);
    }

    let result = accumulator.finish(config, seed, loan_payment);
    info!(
        survival_pct = result.survival_pct,
        weekly_profit_p50 = result.weekly_profit.p50,
        "simulation finished"
    );
    Ok(result)
}

/// Running totals folded from each iteration trace.
struct Accumulator {
    iterations: usize,
    survived: usize,
    broke_even: usize,
    insolvency_months: Vec<u32>,
    weekly_profits: Vec<f64>,
    break_even_months: Vec<f64>,
    /// Indexed `[month][iteration]`.
    monthly_cash: Vec<Vec<f64>>,
}

impl Accumulator {
    fn new(periods: u32, iterations: usize) -> Self {
        Self {
            iterations: 0,
            survived: 0,
            broke_even: 0,
            insolvency_months: Vec::new(),
            weekly_profits: Vec::with_capacity(iterations),
            break_even_months: Vec::with_capacity(iterations),
            monthly_cash: (0..periods)
                .map(|_| Vec::with_capacity(iterations))
                .collect(),
        }
    }

    fn fold(&mut self, trace: IterationTrace) {
        self.iterations += 1;
        if trace.survived {
            self.survived += 1;
        }
        if trace.broke_even {
            self.broke_even += 1;
        }
        if let Some(month) = trace.insolvency_month {
            self.insolvency_months.push(month);
        }
        self.weekly_profits.push(trace.weekly_equivalent);
        self.break_even_months.push(trace.break_even_month as f64);
        for (column, cash) in self.monthly_cash.iter_mut().zip(trace.cash) {
            column.push(cash);
        }
    }

    fn finish(
        mut self,
        config: &ScenarioConfig,
        seed: Option<u64>,
        loan_payment: f64,
    ) -> SimulationResult {
        let runs = self.iterations.max(1) as f64;
        let survival_pct = (self.survived as f64 / runs * 100.0).round();
        let insolvency_pct = (self.insolvency_months.len() as f64 / runs * 100.0).round();
        let break_even_pct = (self.broke_even as f64 / runs * 100.0).round();
        let insolvency_mean_month = if self.insolvency_months.is_empty() {
            None
        } else {
            let total: f64 = self.insolvency_months.iter().map(|m| *m as f64).sum();
            Some(total / self.insolvency_months.len() as f64)
        };
        let weekly_profit_mean = self.weekly_profits.iter().sum::<f64>() / runs;

        sort_ascending(&mut self.weekly_profits);
        sort_ascending(&mut self.break_even_months);

        let cash_flow_bands = self
            .monthly_cash
            .into_iter()
            .enumerate()
            .map(|(month, mut column)| {
                sort_ascending(&mut column);
                let band = PercentileBand::from_sorted(&column);
                MonthlyCashBand {
                    month: month as u32,
                    label: month_label(config, month as u32),
                    p10: band.p10,
                    p50: band.p50,
                    p90: band.p90,
                }
            })
            .collect();

        debug!(
            survived = self.survived,
            insolvent = self.insolvency_months.len(),
            "folded iteration traces"
        );

        SimulationResult {
            scenario: config.name.clone(),
            seed,
            iterations: self.iterations,
            periods: config.periods,
            monthly_loan_payment: loan_payment,
            survival_pct,
            insolvency_pct,
            insolvency_mean_month,
            weekly_profit: PercentileBand::from_sorted(&self.weekly_profits),
            weekly_profit_mean,
            break_even_pct,
            break_even_month: PercentileBand::from_sorted(&self.break_even_months),
            histogram: bucket_sorted(&self.weekly_profits, HISTOGRAM_BUCKETS),
            cash_flow_bands,
            sensitivity: rank_sensitivity(config),
        }
    }
}

fn month_label(config: &ScenarioConfig, month: u32) -> Option<String> {
    config
        .opening_date
        .and_then(|date| date.checked_add_months(Months::new(month)))
        .map(|date| date.format("%Y-%m").to_string())
}
