use crate::domain::scenario::ConfigError;

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Hard-coded policy knobs of the viability model.
///
/// The defaults reproduce the behaviour venue operators are used to seeing;
/// none of them is calibrated against historical data.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPolicy {
    /// Cash below `-multiple * capex` marks the venue insolvent.
    pub insolvency_capex_multiple: f64,
    /// Chance that a given month is hit by bad weather.
    pub weather_event_probability: f64,
    /// CPI above this level pushes extra cost into food and beverage.
    pub cpi_pressure_threshold_pct: f64,
    pub food_cpi_pressure: f64,
    pub beverage_cpi_pressure: f64,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            insolvency_capex_multiple: 2.0,
            weather_event_probability: 0.2,
            cpi_pressure_threshold_pct: 4.0,
            food_cpi_pressure: 0.6,
            beverage_cpi_pressure: 0.3,
        }
    }
}

impl SimulationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probability = self.weather_event_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidWeatherProbability(probability));
        }
        let multiple = self.insolvency_capex_multiple;
        if !multiple.is_finite() || multiple <= 0.0 {
            return Err(ConfigError::InvalidInsolvencyMultiple(multiple));
        }
        for (name, value) in [
            ("CPI pressure threshold", self.cpi_pressure_threshold_pct),
            ("food CPI pressure", self.food_cpi_pressure),
            ("beverage CPI pressure", self.beverage_cpi_pressure),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name.to_string()));
            }
        }
        Ok(())
    }

    /// Extra cost percentage points pushed onto (food, beverage) by CPI
    /// above the pressure threshold.
    pub fn cpi_pressure(&self, cpi_pct: f64) -> (f64, f64) {
        if cpi_pct > self.cpi_pressure_threshold_pct {
            let excess = cpi_pct - self.cpi_pressure_threshold_pct;
            (
                excess * self.food_cpi_pressure,
                excess * self.beverage_cpi_pressure,
            )
        } else {
            (0.0, 0.0)
        }
    }

    pub fn insolvency_threshold(&self, capex: f64) -> f64 {
        -self.insolvency_capex_multiple * capex
    }
}
