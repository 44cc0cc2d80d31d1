use crate::services::percentiles::PercentileBand;
use crate::services::simulation_types::{SensitivityEntry, SimulationResult};

pub fn format_simulation_report(result: &SimulationResult) -> String {
    let seed = match result.seed {
        Some(value) => value.to_string(),
        None => "random".to_string(),
    };
    let insolvency_month = match result.insolvency_mean_month {
        Some(value) => format!("{value:.1}"),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Viability Report".to_string());
    lines.push(format!("Scenario: {}", result.scenario));
    lines.push(format!("Seed: {seed}"));
    lines.push(format!("Iterations: {}", result.iterations));
    lines.push(format!("Horizon: {} months", result.periods));
    lines.push(format!("Loan payment: {:.2}/month", result.monthly_loan_payment));
    lines.push(String::new());
    lines.push(format!("Survival: {:.0}%", result.survival_pct));
    lines.push(format!("Insolvency: {:.0}%", result.insolvency_pct));
    lines.push(format!("Break-even within horizon: {:.0}%", result.break_even_pct));
    lines.push(format!("Mean insolvency month: {insolvency_month}"));
    lines.push(format!("Mean weekly profit: {:.2}", result.weekly_profit_mean));
    lines.push(String::new());
    lines.push("Percentiles:".to_string());
    lines.push("Percentile | Weekly profit | Break-even month".to_string());
    lines.push("-----------|---------------|-----------------".to_string());
    lines.extend(format_percentile_rows(&result.weekly_profit, &result.break_even_month));
    lines.push(String::new());
    lines.push(format_sensitivity_table(&result.sensitivity));

    lines.join("\n")
}

pub fn format_sensitivity_table(entries: &[SensitivityEntry]) -> String {
    let mut lines = Vec::new();
    lines.push("Sensitivity ($/week):".to_string());
    lines.push("Rank | Variable | Impact".to_string());
    lines.push("-----|----------|-------".to_string());
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{rank} | {variable} | {impact:.2}",
            rank = idx + 1,
            variable = entry.variable,
            impact = entry.weekly_impact
        ));
    }
    lines.join("\n")
}

fn format_percentile_rows(profit: &PercentileBand, break_even: &PercentileBand) -> Vec<String> {
    [
        ("P10", profit.p10, break_even.p10),
        ("P50", profit.p50, break_even.p50),
        ("P90", profit.p90, break_even.p90),
    ]
    .into_iter()
    .map(|(label, profit, month)| format!("{label} | {profit:.2} | {month:.0}"))
    .collect()
}
