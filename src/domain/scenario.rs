use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::policy::SimulationPolicy;

/// Longest horizon a scenario may run: fifty years of months.
pub const MAX_PERIODS: u32 = 600;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid range for {name}: expected min <= likely <= max, got ({min}, {likely}, {max})")]
    InvalidRange {
        name: String,
        min: f64,
        likely: f64,
        max: f64,
    },
    #[error("{0} must be a finite number")]
    NotFinite(String),
    #[error("{0} must not be negative")]
    Negative(String),
    #[error("periods must be between 1 and {max}, got {0}", max = MAX_PERIODS)]
    InvalidPeriods(u32),
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("seats must be greater than zero")]
    InvalidSeats,
    #[error("trading days must be between 1 and 7, got {0}")]
    InvalidTradingDays(u32),
    #[error("weather event probability must be between 0 and 1, got {0}")]
    InvalidWeatherProbability(f64),
    #[error("insolvency capex multiple must be greater than zero, got {0}")]
    InvalidInsolvencyMultiple(f64),
}

/// Uncertain input expressed as (min, most likely, max).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointRange {
    pub min: f64,
    pub likely: f64,
    pub max: f64,
}

impl ThreePointRange {
    pub fn new(min: f64, likely: f64, max: f64) -> Self {
        Self { min, likely, max }
    }

    pub fn fixed(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.likely.is_finite() && self.max.is_finite()) {
            return Err(ConfigError::NotFinite(name.to_string()));
        }
        if self.min > self.max || self.likely < self.min || self.likely > self.max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                likely: self.likely,
                max: self.max,
            });
        }
        Ok(())
    }

    fn validate_non_negative(&self, name: &str) -> Result<(), ConfigError> {
        self.validate(name)?;
        if self.min < 0.0 {
            return Err(ConfigError::Negative(name.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRevenue {
    pub name: String,
    /// Covers per trading day.
    pub covers: ThreePointRange,
    pub ticket: ThreePointRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRevenue {
    /// Functions per month.
    pub count: ThreePointRange,
    pub value: ThreePointRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentTerms {
    pub monthly: f64,
    pub annual_escalation_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapitalStructure {
    pub capex: f64,
    pub contingency_pct: f64,
    pub loan_interest_pct: f64,
    /// Zero means the venue carries no loan.
    pub loan_term_months: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSensitivity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl WeatherSensitivity {
    /// Revenue multiplier applied in a month hit by a weather event.
    pub fn revenue_multiplier(&self) -> f64 {
        match self {
            WeatherSensitivity::None => 1.0,
            WeatherSensitivity::Low => 0.95,
            WeatherSensitivity::Medium => 0.85,
            WeatherSensitivity::High => 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub opening_date: Option<NaiveDate>,
    pub seats: u32,
    pub trading_days: u32,
    pub periods: u32,
    pub iterations: usize,
    pub services: Vec<ServiceRevenue>,
    pub events: Option<EventRevenue>,
    pub food_cost_pct: ThreePointRange,
    pub beverage_cost_pct: ThreePointRange,
    pub labour_pct: ThreePointRange,
    pub rent: RentTerms,
    pub overhead: ThreePointRange,
    pub cpi_pct: ThreePointRange,
    pub wage_growth_pct: ThreePointRange,
    pub weather: WeatherSensitivity,
    pub capital: CapitalStructure,
    pub policy: SimulationPolicy,
}

impl ScenarioConfig {
    /// Rejects any configuration the engine cannot simulate meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PERIODS).contains(&self.periods) {
            return Err(ConfigError::InvalidPeriods(self.periods));
        }
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if self.seats == 0 {
            return Err(ConfigError::InvalidSeats);
        }
        if !(1..=7).contains(&self.trading_days) {
            return Err(ConfigError::InvalidTradingDays(self.trading_days));
        }

        for service in &self.services {
            service
                .covers
                .validate_non_negative(&format!("{} covers", service.name))?;
            service
                .ticket
                .validate_non_negative(&format!("{} ticket", service.name))?;
        }
        if let Some(events) = &self.events {
            events.count.validate_non_negative("event count")?;
            events.value.validate_non_negative("event value")?;
        }

        self.food_cost_pct.validate_non_negative("food cost %")?;
        self.beverage_cost_pct.validate_non_negative("beverage cost %")?;
        self.labour_pct.validate_non_negative("labour %")?;
        self.overhead.validate_non_negative("overhead")?;
        // Deflation and falling wages are legitimate draws.
        self.cpi_pct.validate("CPI %")?;
        self.wage_growth_pct.validate("wage growth %")?;

        check_non_negative("rent", self.rent.monthly)?;
        check_non_negative("rent escalation %", self.rent.annual_escalation_pct)?;
        check_non_negative("capex", self.capital.capex)?;
        check_non_negative("contingency %", self.capital.contingency_pct)?;
        check_non_negative("loan interest %", self.capital.loan_interest_pct)?;

        self.policy.validate()
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(name.to_string()));
    }
    if value < 0.0 {
        return Err(ConfigError::Negative(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_fixed_profit_scenario;

    #[test]
    fn validate_accepts_collapsed_ranges() {
        let scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        assert_eq!(scenario.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        scenario.labour_pct = ThreePointRange::new(30.0, 25.0, 20.0);

        let error = scenario.validate().unwrap_err();
        assert!(matches!(error, ConfigError::InvalidRange { ref name, .. } if name == "labour %"));
    }

    #[test]
    fn validate_rejects_likely_outside_bounds() {
        let mut scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        scenario.overhead = ThreePointRange::new(1000.0, 5000.0, 2000.0);

        assert!(matches!(
            scenario.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_periods_and_iterations() {
        let scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 0, 1);
        assert_eq!(scenario.validate(), Err(ConfigError::InvalidPeriods(0)));

        let scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 0);
        assert_eq!(scenario.validate(), Err(ConfigError::InvalidIterations));
    }

    #[test]
    fn validate_rejects_negative_capex_and_nan() {
        let mut scenario = build_fixed_profit_scenario(2000.0, -1.0, 12, 1);
        assert_eq!(
            scenario.validate(),
            Err(ConfigError::Negative("capex".to_string()))
        );

        scenario.capital.capex = 10.0;
        scenario.cpi_pct = ThreePointRange::new(f64::NAN, 2.0, 3.0);
        assert_eq!(
            scenario.validate(),
            Err(ConfigError::NotFinite("CPI %".to_string()))
        );
    }

    #[test]
    fn validate_allows_negative_cpi_but_not_negative_covers() {
        let mut scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        scenario.cpi_pct = ThreePointRange::new(-1.0, 2.0, 5.0);
        assert_eq!(scenario.validate(), Ok(()));

        scenario.services.push(ServiceRevenue {
            name: "lunch".to_string(),
            covers: ThreePointRange::new(-5.0, 10.0, 20.0),
            ticket: ThreePointRange::fixed(30.0),
        });
        assert_eq!(
            scenario.validate(),
            Err(ConfigError::Negative("lunch covers".to_string()))
        );
    }

    #[test]
    fn validate_checks_trading_days() {
        let mut scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        scenario.trading_days = 8;
        assert_eq!(scenario.validate(), Err(ConfigError::InvalidTradingDays(8)));
    }

    #[test]
    fn validate_rejects_horizon_beyond_max_periods() {
        let scenario = build_fixed_profit_scenario(1.0, 1.0, MAX_PERIODS, 1);
        assert_eq!(scenario.validate(), Ok(()));

        let scenario = build_fixed_profit_scenario(1.0, 1.0, MAX_PERIODS + 1, 1);
        assert_eq!(
            scenario.validate(),
            Err(ConfigError::InvalidPeriods(MAX_PERIODS + 1))
        );

        let scenario = build_fixed_profit_scenario(1.0, 1.0, u32::MAX, 1);
        assert_eq!(scenario.validate(), Err(ConfigError::InvalidPeriods(u32::MAX)));
    }

    #[test]
    fn weather_sensitivity_uses_lowercase_names() {
        let level: WeatherSensitivity = serde_yaml::from_str("high").unwrap();
        assert_eq!(level, WeatherSensitivity::High);
        assert!(serde_yaml::from_str::<WeatherSensitivity>("stormy").is_err());
        assert_eq!(serde_yaml::to_string(&WeatherSensitivity::Low).unwrap().trim(), "low");
        assert_eq!(WeatherSensitivity::Medium.revenue_multiplier(), 0.85);
    }
}
