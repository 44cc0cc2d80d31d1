use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_sensitivity_table;
use crate::services::scenario_yaml::load_scenario_from_yaml_file;
use crate::services::sensitivity::{baseline_monthly_revenue, rank_sensitivity};

pub fn sensitivity_command(cmd: Commands) -> ExitCode {
    let Commands::Sensitivity { input } = cmd else {
        return ExitCode::FAILURE;
    };

    let scenario = match load_scenario_from_yaml_file(&input) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Failed to load scenario: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Scenario: {}", scenario.name);
    println!(
        "Baseline monthly revenue: {:.2}",
        baseline_monthly_revenue(&scenario)
    );
    println!("{}", format_sensitivity_table(&rank_sensitivity(&scenario)));
    ExitCode::SUCCESS
}
