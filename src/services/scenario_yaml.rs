use std::io;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::policy::SimulationPolicy;
use crate::domain::scenario::{
    CapitalStructure, ConfigError, EventRevenue, RentTerms, ScenarioConfig, ServiceRevenue,
    ThreePointRange, WeatherSensitivity,
};

#[derive(Error, Debug)]
pub enum ScenarioYamlError {
    #[error("failed to read scenario yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse scenario yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid scenario: {0}")]
    Invalid(#[from] ConfigError),
}

/// A range is either a bare number or an explicit `{min, likely, max}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(untagged)]
enum RangeRecord {
    Fixed(f64),
    Range { min: f64, likely: f64, max: f64 },
}

impl From<RangeRecord> for ThreePointRange {
    fn from(record: RangeRecord) -> Self {
        match record {
            RangeRecord::Fixed(value) => ThreePointRange::fixed(value),
            RangeRecord::Range { min, likely, max } => ThreePointRange::new(min, likely, max),
        }
    }
}

impl From<&ThreePointRange> for RangeRecord {
    fn from(range: &ThreePointRange) -> Self {
        if range.min == range.max {
            RangeRecord::Fixed(range.likely)
        } else {
            RangeRecord::Range {
                min: range.min,
                likely: range.likely,
                max: range.max,
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ScenarioRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opening_date: Option<String>,
    seats: u32,
    trading_days: u32,
    months: u32,
    iterations: usize,
    #[serde(default)]
    services: Vec<ServiceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events: Option<EventRecord>,
    food_cost_pct: RangeRecord,
    beverage_cost_pct: RangeRecord,
    labour_pct: RangeRecord,
    rent: RentRecord,
    overhead: RangeRecord,
    cpi_pct: RangeRecord,
    wage_growth_pct: RangeRecord,
    #[serde(default)]
    weather_sensitivity: WeatherSensitivity,
    capital: CapitalRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy: Option<PolicyRecord>,
}

#[derive(Serialize, Deserialize)]
struct ServiceRecord {
    name: String,
    covers: RangeRecord,
    ticket: RangeRecord,
}

#[derive(Serialize, Deserialize)]
struct EventRecord {
    count: RangeRecord,
    value: RangeRecord,
}

#[derive(Serialize, Deserialize)]
struct RentRecord {
    monthly: f64,
    #[serde(default)]
    annual_escalation_pct: f64,
}

#[derive(Serialize, Deserialize)]
struct CapitalRecord {
    capex: f64,
    #[serde(default)]
    contingency_pct: f64,
    #[serde(default)]
    loan_interest_pct: f64,
    #[serde(default)]
    loan_term_months: u32,
}

#[derive(Serialize, Deserialize, Default)]
struct PolicyRecord {
    insolvency_capex_multiple: Option<f64>,
    weather_event_probability: Option<f64>,
    cpi_pressure_threshold_pct: Option<f64>,
    food_cpi_pressure: Option<f64>,
    beverage_cpi_pressure: Option<f64>,
}

pub fn load_scenario_from_yaml_file(path: &str) -> Result<ScenarioConfig, ScenarioYamlError> {
    let scenario = read_scenario_from_yaml_file(path)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Reads a scenario without validating it, so run overrides can be applied first.
pub fn read_scenario_from_yaml_file(path: &str) -> Result<ScenarioConfig, ScenarioYamlError> {
    let contents = std::fs::read_to_string(path)?;
    parse_scenario_yaml(&contents)
}

pub fn deserialize_scenario_from_yaml_str(input: &str) -> Result<ScenarioConfig, ScenarioYamlError> {
    let scenario = parse_scenario_yaml(input)?;
    scenario.validate()?;
    Ok(scenario)
}

fn parse_scenario_yaml(input: &str) -> Result<ScenarioConfig, ScenarioYamlError> {
    let record: ScenarioRecord = serde_yaml::from_str(input)?;
    scenario_from_record(record)
}

pub fn serialize_scenario_to_yaml(scenario: &ScenarioConfig) -> Result<String, ScenarioYamlError> {
    Ok(serde_yaml::to_string(&record_from_scenario(scenario))?)
}

fn scenario_from_record(record: ScenarioRecord) -> Result<ScenarioConfig, ScenarioYamlError> {
    let opening_date = record
        .opening_date
        .as_deref()
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| ScenarioYamlError::InvalidDate(value.to_string()))
        })
        .transpose()?;
    let policy = policy_from_record(record.policy.unwrap_or_default());

    Ok(ScenarioConfig {
        name: record.name,
        opening_date,
        seats: record.seats,
        trading_days: record.trading_days,
        periods: record.months,
        iterations: record.iterations,
        services: record
            .services
            .into_iter()
            .map(|service| ServiceRevenue {
                name: service.name,
                covers: service.covers.into(),
                ticket: service.ticket.into(),
            })
            .collect(),
        events: record.events.map(|events| EventRevenue {
            count: events.count.into(),
            value: events.value.into(),
        }),
        food_cost_pct: record.food_cost_pct.into(),
        beverage_cost_pct: record.beverage_cost_pct.into(),
        labour_pct: record.labour_pct.into(),
        rent: RentTerms {
            monthly: record.rent.monthly,
            annual_escalation_pct: record.rent.annual_escalation_pct,
        },
        overhead: record.overhead.into(),
        cpi_pct: record.cpi_pct.into(),
        wage_growth_pct: record.wage_growth_pct.into(),
        weather: record.weather_sensitivity,
        capital: CapitalStructure {
            capex: record.capital.capex,
            contingency_pct: record.capital.contingency_pct,
            loan_interest_pct: record.capital.loan_interest_pct,
            loan_term_months: record.capital.loan_term_months,
        },
        policy,
    })
}

fn policy_from_record(record: PolicyRecord) -> SimulationPolicy {
    let defaults = SimulationPolicy::default();
    SimulationPolicy {
        insolvency_capex_multiple: record
            .insolvency_capex_multiple
            .unwrap_or(defaults.insolvency_capex_multiple),
        weather_event_probability: record
            .weather_event_probability
            .unwrap_or(defaults.weather_event_probability),
        cpi_pressure_threshold_pct: record
            .cpi_pressure_threshold_pct
            .unwrap_or(defaults.cpi_pressure_threshold_pct),
        food_cpi_pressure: record.food_cpi_pressure.unwrap_or(defaults.food_cpi_pressure),
        beverage_cpi_pressure: record
            .beverage_cpi_pressure
            .unwrap_or(defaults.beverage_cpi_pressure),
    }
}

fn record_from_scenario(scenario: &ScenarioConfig) -> ScenarioRecord {
    let policy = (scenario.policy != SimulationPolicy::default()).then(|| PolicyRecord {
        insolvency_capex_multiple: Some(scenario.policy.insolvency_capex_multiple),
        weather_event_probability: Some(scenario.policy.weather_event_probability),
        cpi_pressure_threshold_pct: Some(scenario.policy.cpi_pressure_threshold_pct),
        food_cpi_pressure: Some(scenario.policy.food_cpi_pressure),
        beverage_cpi_pressure: Some(scenario.policy.beverage_cpi_pressure),
    });

    ScenarioRecord {
        name: scenario.name.clone(),
        opening_date: scenario
            .opening_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
        seats: scenario.seats,
        trading_days: scenario.trading_days,
        months: scenario.periods,
        iterations: scenario.iterations,
        services: scenario
            .services
            .iter()
            .map(|service| ServiceRecord {
                name: service.name.clone(),
                covers: (&service.covers).into(),
                ticket: (&service.ticket).into(),
            })
            .collect(),
        events: scenario.events.as_ref().map(|events| EventRecord {
            count: (&events.count).into(),
            value: (&events.value).into(),
        }),
        food_cost_pct: (&scenario.food_cost_pct).into(),
        beverage_cost_pct: (&scenario.beverage_cost_pct).into(),
        labour_pct: (&scenario.labour_pct).into(),
        rent: RentRecord {
            monthly: scenario.rent.monthly,
            annual_escalation_pct: scenario.rent.annual_escalation_pct,
        },
        overhead: (&scenario.overhead).into(),
        cpi_pct: (&scenario.cpi_pct).into(),
        wage_growth_pct: (&scenario.wage_growth_pct).into(),
        weather_sensitivity: scenario.weather,
        capital: CapitalRecord {
            capex: scenario.capital.capex,
            contingency_pct: scenario.capital.contingency_pct,
            loan_interest_pct: scenario.capital.loan_interest_pct,
            loan_term_months: scenario.capital.loan_term_months,
        },
        policy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_bistro_scenario;

    const SCENARIO_YAML: &str = r#"
name: Harbour Bistro
opening_date: 2026-03-01
seats: 80
trading_days: 6
months: 36
iterations: 500
services:
  - name: dinner
    covers: { min: 40, likely: 60, max: 90 }
    ticket: { min: 45, likely: 55, max: 70 }
  - name: lunch
    covers: 30
    ticket: { min: 18, likely: 25, max: 32 }
food_cost_pct: { min: 26, likely: 30, max: 35 }
beverage_cost_pct: 10
labour_pct: { min: 24, likely: 28, max: 34 }
rent:
  monthly: 12000
  annual_escalation_pct: 3
overhead: { min: 6000, likely: 8000, max: 11000 }
cpi_pct: { min: 1.5, likely: 3, max: 7 }
wage_growth_pct: { min: 2, likely: 3.5, max: 6 }
weather_sensitivity: medium
capital:
  capex: 250000
  contingency_pct: 10
  loan_interest_pct: 7.5
  loan_term_months: 84
"#;

    #[test]
    fn deserialize_scenario_reads_ranges_and_constants() {
        let scenario = deserialize_scenario_from_yaml_str(SCENARIO_YAML).unwrap();

        assert_eq!(scenario.name, "Harbour Bistro");
        assert_eq!(scenario.opening_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(scenario.periods, 36);
        assert_eq!(scenario.services.len(), 2);
        assert_eq!(scenario.services[0].covers, ThreePointRange::new(40.0, 60.0, 90.0));
        assert_eq!(scenario.services[1].covers, ThreePointRange::fixed(30.0));
        assert_eq!(scenario.beverage_cost_pct, ThreePointRange::fixed(10.0));
        assert_eq!(scenario.weather, WeatherSensitivity::Medium);
        assert_eq!(scenario.capital.loan_term_months, 84);
        assert!(scenario.events.is_none());
        assert_eq!(scenario.policy, SimulationPolicy::default());
    }

    #[test]
    fn deserialize_scenario_applies_policy_overrides() {
        let yaml = format!(
            "{SCENARIO_YAML}policy:\n  weather_event_probability: 0.35\n  insolvency_capex_multiple: 1.5\n"
        );
        let scenario = deserialize_scenario_from_yaml_str(&yaml).unwrap();

        assert_eq!(scenario.policy.weather_event_probability, 0.35);
        assert_eq!(scenario.policy.insolvency_capex_multiple, 1.5);
        assert_eq!(scenario.policy.food_cpi_pressure, 0.6);
    }

    #[test]
    fn deserialize_scenario_rejects_inverted_range() {
        let yaml = SCENARIO_YAML.replace(
            "overhead: { min: 6000, likely: 8000, max: 11000 }",
            "overhead: { min: 11000, likely: 8000, max: 6000 }",
        );
        let error = deserialize_scenario_from_yaml_str(&yaml).unwrap_err();

        assert!(matches!(
            error,
            ScenarioYamlError::Invalid(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn deserialize_scenario_rejects_unknown_weather() {
        let yaml = SCENARIO_YAML.replace("weather_sensitivity: medium", "weather_sensitivity: monsoon");
        let error = deserialize_scenario_from_yaml_str(&yaml).unwrap_err();

        assert!(matches!(error, ScenarioYamlError::Parse(_)));
    }

    #[test]
    fn missing_weather_sensitivity_defaults_to_none() {
        let yaml = SCENARIO_YAML.replace("weather_sensitivity: medium\n", "");
        let scenario = deserialize_scenario_from_yaml_str(&yaml).unwrap();

        assert_eq!(scenario.weather, WeatherSensitivity::None);
    }

    #[test]
    fn read_scenario_defers_validation_to_the_caller() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("scenario.yaml");
        std::fs::write(&path, SCENARIO_YAML.replace("iterations: 500", "iterations: 0")).unwrap();
        let path = path.to_str().unwrap();

        let scenario = read_scenario_from_yaml_file(path).unwrap();
        assert_eq!(scenario.iterations, 0);
        assert!(matches!(
            load_scenario_from_yaml_file(path),
            Err(ScenarioYamlError::Invalid(ConfigError::InvalidIterations))
        ));
    }

    #[test]
    fn deserialize_scenario_rejects_bad_opening_date() {
        let yaml = SCENARIO_YAML.replace("2026-03-01", "01/03/2026");
        let error = deserialize_scenario_from_yaml_str(&yaml).unwrap_err();

        assert!(matches!(error, ScenarioYamlError::InvalidDate(_)));
    }

    #[test]
    fn serialized_scenario_loads_back_unchanged() {
        let scenario = build_bistro_scenario();
        let yaml = serialize_scenario_to_yaml(&scenario).unwrap();

        assert!(yaml.contains("name: Harbour Bistro"));
        assert!(yaml.contains("weather_sensitivity: medium"));
        assert_eq!(deserialize_scenario_from_yaml_str(&yaml).unwrap(), scenario);
    }
}
