use std::process::ExitCode;

use chrono::Local;

use crate::commands::base_commands::Commands;
use crate::domain::policy::SimulationPolicy;
use crate::domain::scenario::{
    CapitalStructure, EventRevenue, RentTerms, ScenarioConfig, ServiceRevenue, ThreePointRange,
    WeatherSensitivity,
};
use crate::services::scenario_yaml::serialize_scenario_to_yaml;

pub fn template_command(cmd: Commands) -> ExitCode {
    let Commands::Template { output } = cmd else {
        return ExitCode::FAILURE;
    };

    let yaml = match serialize_scenario_to_yaml(&sample_scenario()) {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Failed to serialize sample scenario: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&output, yaml) {
        eprintln!("Failed to write sample scenario: {e}");
        return ExitCode::FAILURE;
    }

    println!("Sample scenario written to {output}");
    ExitCode::SUCCESS
}

/// A mid-size neighbourhood restaurant opening today.
fn sample_scenario() -> ScenarioConfig {
    ScenarioConfig {
        name: "Sample Venue".to_string(),
        opening_date: Some(Local::now().date_naive()),
        seats: 60,
        trading_days: 6,
        periods: 36,
        iterations: 1000,
        services: vec![
            ServiceRevenue {
                name: "lunch".to_string(),
                covers: ThreePointRange::new(15.0, 25.0, 40.0),
                ticket: ThreePointRange::new(18.0, 24.0, 30.0),
            },
            ServiceRevenue {
                name: "dinner".to_string(),
                covers: ThreePointRange::new(35.0, 55.0, 80.0),
                ticket: ThreePointRange::new(42.0, 52.0, 65.0),
            },
        ],
        events: Some(EventRevenue {
            count: ThreePointRange::new(0.0, 1.0, 3.0),
            value: ThreePointRange::new(1500.0, 2500.0, 4000.0),
        }),
        food_cost_pct: ThreePointRange::new(26.0, 30.0, 34.0),
        beverage_cost_pct: ThreePointRange::new(7.0, 9.0, 12.0),
        labour_pct: ThreePointRange::new(25.0, 29.0, 35.0),
        rent: RentTerms {
            monthly: 9500.0,
            annual_escalation_pct: 3.0,
        },
        overhead: ThreePointRange::new(5000.0, 6500.0, 9000.0),
        cpi_pct: ThreePointRange::new(1.5, 3.0, 6.5),
        wage_growth_pct: ThreePointRange::new(2.0, 3.5, 5.5),
        weather: WeatherSensitivity::Low,
        capital: CapitalStructure {
            capex: 220_000.0,
            contingency_pct: 15.0,
            loan_interest_pct: 8.0,
            loan_term_months: 60,
        },
        policy: SimulationPolicy::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_scenario_is_valid() {
        assert_eq!(sample_scenario().validate(), Ok(()));
    }
}
