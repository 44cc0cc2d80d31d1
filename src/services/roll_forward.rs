use thiserror::Error;

use crate::domain::policy::WEEKS_PER_MONTH;
use crate::domain::scenario::{CapitalStructure, ScenarioConfig};
use crate::services::triangular_sampler::{SamplerError, ScenarioSampler};

#[derive(Error, Debug, PartialEq)]
pub enum RollForwardError {
    #[error(transparent)]
    Sampling(#[from] SamplerError),
    #[error("cash position is no longer a finite number in month {month}")]
    NonFiniteCash { month: u32 },
}

/// Macro regime drawn once for a whole simulated life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroDraw {
    pub cpi_pct: f64,
    pub wage_growth_pct: f64,
}

/// Outcome of one simulated life of the venue.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationTrace {
    /// Cash on hand at the end of each month.
    pub cash: Vec<f64>,
    /// First month with non-negative cash; `periods` when never reached.
    pub break_even_month: u32,
    pub broke_even: bool,
    pub insolvency_month: Option<u32>,
    pub survived: bool,
    pub weekly_equivalent: f64,
}

/// Level monthly payment that amortises `capex` over the loan term.
pub fn monthly_loan_payment(capital: &CapitalStructure) -> f64 {
    if capital.loan_term_months == 0 || capital.capex == 0.0 {
        return 0.0;
    }
    let term = capital.loan_term_months as f64;
    let rate = capital.loan_interest_pct / 1200.0;
    if rate == 0.0 {
        return capital.capex / term;
    }
    capital.capex * rate / (1.0 - (1.0 + rate).powf(-term))
}

pub fn draw_macro<S: ScenarioSampler + ?Sized>(
    config: &ScenarioConfig,
    sampler: &mut S,
) -> Result<MacroDraw, SamplerError> {
    Ok(MacroDraw {
        cpi_pct: sampler.sample_range(&config.cpi_pct)?,
        wage_growth_pct: sampler.sample_range(&config.wage_growth_pct)?,
    })
}

/// Simulates one full life: draws the macro regime, then rolls the months.
pub fn simulate_life<S: ScenarioSampler + ?Sized>(
    config: &ScenarioConfig,
    loan_payment: f64,
    sampler: &mut S,
) -> Result<IterationTrace, RollForwardError> {
    let macro_draw = draw_macro(config, sampler)?;
    roll_forward(config, &macro_draw, loan_payment, sampler)
}

pub fn roll_forward<S: ScenarioSampler + ?Sized>(
    config: &ScenarioConfig,
    macro_draw: &MacroDraw,
    loan_payment: f64,
    sampler: &mut S,
) -> Result<IterationTrace, RollForwardError> {
    let capital = &config.capital;
    let policy = &config.policy;
    let periods = config.periods;
    let insolvency_threshold = policy.insolvency_threshold(capital.capex);
    let (food_pressure, beverage_pressure) = policy.cpi_pressure(macro_draw.cpi_pct);
    let operating_weeks = config.trading_days as f64 * WEEKS_PER_MONTH;

    let mut cash = -(capital.capex * (1.0 + capital.contingency_pct / 100.0));
    let mut series = Vec::with_capacity(periods as usize);
    let mut break_even = None;
    let mut insolvency = None;

    for month in 0..periods {
        let year = (month / 12) as i32;
        let year_mult = (1.0 + macro_draw.cpi_pct / 100.0).powi(year);
        let wage_mult = (1.0 + macro_draw.wage_growth_pct / 100.0).powi(year);

        let weather_mult = if sampler.chance(policy.weather_event_probability)? {
            config.weather.revenue_multiplier()
        } else {
            1.0
        };

        let mut revenue = 0.0;
        for service in &config.services {
            let covers = sampler.sample_range(&service.covers)?;
            let ticket = sampler.sample_range(&service.ticket)?;
            revenue += covers * operating_weeks * weather_mult * ticket;
        }
        if let Some(events) = &config.events {
            let count = sampler.sample_range(&events.count)?;
            let value = sampler.sample_range(&events.value)?;
            revenue += count * value;
        }

        let food_pct = sampler.sample_range(&config.food_cost_pct)?;
        let beverage_pct = sampler.sample_range(&config.beverage_cost_pct)?;
        let labour_pct = sampler.sample_range(&config.labour_pct)?;
        let overhead = sampler.sample_range(&config.overhead)?;

        let food_cost = revenue * (food_pct + food_pressure) / 100.0 * year_mult;
        let beverage_cost = revenue * (beverage_pct + beverage_pressure) / 100.0 * year_mult;
        let labour_cost = revenue * labour_pct / 100.0 * wage_mult;
        let rent = config.rent.monthly * (1.0 + config.rent.annual_escalation_pct / 100.0).powi(year);
        let overhead_cost = overhead * year_mult;

        let profit = revenue
            - food_cost
            - beverage_cost
            - labour_cost
            - rent
            - overhead_cost
            - loan_payment;
        cash += profit;
        if !cash.is_finite() {
            return Err(RollForwardError::NonFiniteCash { month });
        }
        series.push(cash);

        if break_even.is_none() && cash >= 0.0 {
            break_even = Some(month);
        }
        // Keep rolling after insolvency so every month has a value.
        if insolvency.is_none() && cash < insolvency_threshold {
            insolvency = Some(month);
        }
    }

    Ok(IterationTrace {
        cash: series,
        break_even_month: break_even.unwrap_or(periods),
        broke_even: break_even.is_some(),
        insolvency_month: insolvency,
        survived: insolvency.is_none(),
        weekly_equivalent: cash / (periods as f64 / WEEKS_PER_MONTH),
    })
}
