use plotters::prelude::*;
use thiserror::Error;

use crate::services::simulation_types::MonthlyCashBand;

#[derive(Error, Debug)]
pub enum CashFlowPlotError {
    #[error("cash flow bands are empty")]
    EmptyBands,
    #[error("failed to render cash flow plot: {0}")]
    Plot(String),
}

/// Renders the P10/P50/P90 cash position per month as a line chart.
pub fn write_cash_flow_png(
    output_path: &str,
    bands: &[MonthlyCashBand],
) -> Result<(), CashFlowPlotError> {
    if bands.is_empty() {
        return Err(CashFlowPlotError::EmptyBands);
    }

    let min_cash = bands
        .iter()
        .map(|band| band.p10)
        .fold(0.0_f64, f64::min);
    let max_cash = bands
        .iter()
        .map(|band| band.p90)
        .fold(0.0_f64, f64::max);
    let padding = ((max_cash - min_cash) * 0.05).max(1.0);
    let max_x = bands.len() as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cash Position by Month", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(0..max_x, (min_cash - padding)..(max_cash + padding))
        .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;

    let label_count = bands.len().clamp(1, 12);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Month")
        .y_desc("Cash ($)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            bands
                .get(*index as usize)
                .map(|band| band.label.clone().unwrap_or_else(|| band.month.to_string()))
                .unwrap_or_default()
        })
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            [(0, 0.0), (max_x, 0.0)],
            BLACK.mix(0.4).stroke_width(1),
        ))
        .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;

    let series: [(fn(&MonthlyCashBand) -> f64, RGBColor); 3] = [
        (|band| band.p10, RGBColor(214, 57, 57)),
        (|band| band.p50, RGBColor(30, 122, 204)),
        (|band| band.p90, RGBColor(46, 160, 67)),
    ];
    for (value_of, color) in series {
        chart
            .draw_series(LineSeries::new(
                bands
                    .iter()
                    .enumerate()
                    .map(|(idx, band)| (idx as i32, value_of(band))),
                color.stroke_width(2),
            ))
            .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;
    }

    root.present()
        .map_err(|e| CashFlowPlotError::Plot(e.to_string()))?;
    Ok(())
}
