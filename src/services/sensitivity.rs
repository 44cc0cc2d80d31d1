//! Static "tornado" ranking of input variables.
//!
//! Impacts are closed-form estimates from each configured range width and the
//! most likely values of the other inputs. Nothing here is sampled, so the
//! ranking for a given scenario is the same for every seed.

use crate::domain::policy::WEEKS_PER_MONTH;
use crate::domain::scenario::ScenarioConfig;
use crate::services::simulation_types::SensitivityEntry;

/// Monthly revenue using only the most likely value of every driver.
pub fn baseline_monthly_revenue(config: &ScenarioConfig) -> f64 {
    let operating_weeks = config.trading_days as f64 * WEEKS_PER_MONTH;
    let services: f64 = config
        .services
        .iter()
        .map(|service| service.covers.likely * service.ticket.likely * operating_weeks)
        .sum();
    let events = config
        .events
        .as_ref()
        .map(|events| events.count.likely * events.value.likely)
        .unwrap_or(0.0);
    services + events
}

pub fn rank_sensitivity(config: &ScenarioConfig) -> Vec<SensitivityEntry> {
    let baseline = baseline_monthly_revenue(config);
    let trading_days = config.trading_days as f64;
    let weekly = |monthly: f64| monthly / WEEKS_PER_MONTH;

    let mut entries = Vec::new();
    let mut push = |variable: String, weekly_impact: f64| {
        entries.push(SensitivityEntry {
            variable,
            weekly_impact,
        });
    };

    for service in &config.services {
        push(
            format!("{} covers", service.name),
            service.covers.width() * service.ticket.likely * trading_days,
        );
        push(
            format!("{} ticket", service.name),
            service.ticket.width() * service.covers.likely * trading_days,
        );
    }
    if let Some(events) = &config.events {
        push(
            "event count".to_string(),
            weekly(events.count.width() * events.value.likely),
        );
        push(
            "event value".to_string(),
            weekly(events.value.width() * events.count.likely),
        );
    }

    push(
        "food cost %".to_string(),
        weekly(baseline * config.food_cost_pct.width() / 100.0),
    );
    push(
        "beverage cost %".to_string(),
        weekly(baseline * config.beverage_cost_pct.width() / 100.0),
    );
    push(
        "labour %".to_string(),
        weekly(baseline * config.labour_pct.width() / 100.0),
    );
    push("overhead".to_string(), weekly(config.overhead.width()));

    let inflating_costs = baseline
        * (config.food_cost_pct.likely + config.beverage_cost_pct.likely)
        / 100.0
        + config.overhead.likely;
    push(
        "CPI %".to_string(),
        weekly(inflating_costs * config.cpi_pct.width() / 100.0),
    );
    let labour_cost = baseline * config.labour_pct.likely / 100.0;
    push(
        "wage growth %".to_string(),
        weekly(labour_cost * config.wage_growth_pct.width() / 100.0),
    );

    let weather_loss = baseline
        * config.policy.weather_event_probability
        * (1.0 - config.weather.revenue_multiplier());
    push("weather".to_string(), weekly(weather_loss));

    entries.sort_by(|a, b| {
        b.weekly_impact
            .total_cmp(&a.weekly_impact)
            .then_with(|| a.variable.cmp(&b.variable))
    });
    entries
}
