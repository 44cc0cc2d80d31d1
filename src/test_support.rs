use chrono::NaiveDate;

use crate::domain::policy::SimulationPolicy;
use crate::domain::scenario::{
    CapitalStructure, EventRevenue, RentTerms, ScenarioConfig, ServiceRevenue, ThreePointRange,
    WeatherSensitivity,
};
use crate::services::triangular_sampler::{SamplerError, ScenarioSampler};

// A mock sampler that always returns the most likely value
#[derive(Default)]
pub struct MockSampler {
    pub weather_hits: bool,
}

impl MockSampler {
    pub fn with_weather() -> Self {
        Self { weather_hits: true }
    }
}

impl ScenarioSampler for MockSampler {
    fn sample(&mut self, _min: f64, likely: f64, _max: f64) -> Result<f64, SamplerError> {
        Ok(likely)
    }

    fn chance(&mut self, _probability: f64) -> Result<bool, SamplerError> {
        Ok(self.weather_hits)
    }
}

/// A venue whose every month nets exactly `monthly_profit` with no loan.
///
/// Profit comes from a single fixed event; a loss comes from fixed overhead.
pub fn build_fixed_profit_scenario(
    monthly_profit: f64,
    capex: f64,
    periods: u32,
    iterations: usize,
) -> ScenarioConfig {
    let (events, overhead) = if monthly_profit >= 0.0 {
        (
            Some(EventRevenue {
                count: ThreePointRange::fixed(1.0),
                value: ThreePointRange::fixed(monthly_profit),
            }),
            0.0,
        )
    } else {
        (None, -monthly_profit)
    };

    ScenarioConfig {
        name: "Fixed".to_string(),
        opening_date: None,
        seats: 40,
        trading_days: 5,
        periods,
        iterations,
        services: Vec::new(),
        events,
        food_cost_pct: ThreePointRange::fixed(0.0),
        beverage_cost_pct: ThreePointRange::fixed(0.0),
        labour_pct: ThreePointRange::fixed(0.0),
        rent: RentTerms {
            monthly: 0.0,
            annual_escalation_pct: 0.0,
        },
        overhead: ThreePointRange::fixed(overhead),
        cpi_pct: ThreePointRange::fixed(0.0),
        wage_growth_pct: ThreePointRange::fixed(0.0),
        weather: WeatherSensitivity::None,
        capital: CapitalStructure {
            capex,
            contingency_pct: 0.0,
            loan_interest_pct: 0.0,
            loan_term_months: 0,
        },
        policy: SimulationPolicy::default(),
    }
}

pub fn build_bistro_scenario() -> ScenarioConfig {
    ScenarioConfig {
        name: "Harbour Bistro".to_string(),
        opening_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        seats: 80,
        trading_days: 6,
        periods: 36,
        iterations: 500,
        services: vec![
            ServiceRevenue {
                name: "dinner".to_string(),
                covers: ThreePointRange::new(40.0, 60.0, 90.0),
                ticket: ThreePointRange::new(45.0, 55.0, 70.0),
            },
            ServiceRevenue {
                name: "lunch".to_string(),
                covers: ThreePointRange::new(20.0, 30.0, 45.0),
                ticket: ThreePointRange::new(18.0, 25.0, 32.0),
            },
        ],
        events: Some(EventRevenue {
            count: ThreePointRange::new(0.0, 2.0, 4.0),
            value: ThreePointRange::new(2000.0, 3000.0, 5000.0),
        }),
        food_cost_pct: ThreePointRange::new(26.0, 30.0, 35.0),
        beverage_cost_pct: ThreePointRange::new(8.0, 10.0, 12.0),
        labour_pct: ThreePointRange::new(24.0, 28.0, 34.0),
        rent: RentTerms {
            monthly: 12_000.0,
            annual_escalation_pct: 3.0,
        },
        overhead: ThreePointRange::new(6000.0, 8000.0, 11_000.0),
        cpi_pct: ThreePointRange::new(1.5, 3.0, 7.0),
        wage_growth_pct: ThreePointRange::new(2.0, 3.5, 6.0),
        weather: WeatherSensitivity::Medium,
        capital: CapitalStructure {
            capex: 250_000.0,
            contingency_pct: 10.0,
            loan_interest_pct: 7.5,
            loan_term_months: 84,
        },
        policy: SimulationPolicy::default(),
    }
}
