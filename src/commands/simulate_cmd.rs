use std::process::ExitCode;

use crate::commands::base_commands::{Commands, OutputFormat};
use crate::commands::report_format::format_simulation_report;
use crate::services::cash_flow_plot::write_cash_flow_png;
use crate::services::histogram::write_histogram_png;
use crate::services::simulation::{RunOverrides, simulate_from_scenario_file};
use crate::services::simulation_types::SimulationResult;

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        input,
        output,
        iterations,
        months,
        seed,
        format,
        no_plots,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let overrides = RunOverrides {
        iterations,
        periods: months,
        seed,
    };
    let result = match simulate_from_scenario_file(&input, &overrides) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to simulate scenario: {e}");
            return ExitCode::FAILURE;
        }
    };

    let contents = match serialize_result(&result, format) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation output: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&output, contents) {
        eprintln!("Failed to write simulation output: {e}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_simulation_report(&result));
    println!("Simulation result written to {output}");

    if !no_plots {
        let histogram_path = format!("{output}.png");
        match write_histogram_png(&histogram_path, &result.histogram) {
            Ok(()) => println!("Profit histogram written to {histogram_path}"),
            Err(e) => eprintln!("Failed to write profit histogram: {e}"),
        }
        let cash_flow_path = format!("{output}.cashflow.png");
        match write_cash_flow_png(&cash_flow_path, &result.cash_flow_bands) {
            Ok(()) => println!("Cash flow chart written to {cash_flow_path}"),
            Err(e) => eprintln!("Failed to write cash flow chart: {e}"),
        }
    }

    ExitCode::SUCCESS
}

fn serialize_result(result: &SimulationResult, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(result).map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(result).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::simulation::run_simulation;
    use crate::test_support::build_fixed_profit_scenario;

    #[test]
    fn serialize_result_supports_yaml_and_json() {
        let scenario = build_fixed_profit_scenario(2000.0, 100_000.0, 12, 1);
        let result = run_simulation(&scenario, Some(1)).unwrap();

        let yaml = serialize_result(&result, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("survival_pct: 100.0"));
        assert!(yaml.contains("insolvency_mean_month: null"));

        let json = serialize_result(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["survival_pct"], 100.0);
        assert_eq!(value["break_even_month"]["p50"], 12.0);
        assert_eq!(value["histogram"].as_array().unwrap().len(), 20);
    }
}
