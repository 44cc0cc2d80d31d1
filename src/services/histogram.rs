use plotters::prelude::*;
use serde::Serialize;
use thiserror::Error;

pub const HISTOGRAM_BUCKETS: usize = 20;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    /// Callers colour bars by the sign of the midpoint.
    pub midpoint: f64,
    pub count: usize,
}

/// Splits `[min, max]` of an ascending slice into equal-width buckets.
///
/// When every value is equal the range collapses and all values land in the
/// first bucket.
pub fn bucket_sorted(sorted_values: &[f64], buckets: usize) -> Vec<HistogramBucket> {
    let (Some(&min_value), Some(&max_value)) = (sorted_values.first(), sorted_values.last())
    else {
        return Vec::new();
    };
    if buckets == 0 {
        return Vec::new();
    }

    let width = (max_value - min_value) / buckets as f64;
    let mut histogram: Vec<HistogramBucket> = (0..buckets)
        .map(|idx| {
            let lower = min_value + width * idx as f64;
            let upper = if idx + 1 == buckets {
                max_value
            } else {
                min_value + width * (idx + 1) as f64
            };
            HistogramBucket {
                lower,
                upper,
                midpoint: (lower + upper) / 2.0,
                count: 0,
            }
        })
        .collect();

    for value in sorted_values {
        let idx = if width > 0.0 {
            (((value - min_value) / width).floor() as usize).min(buckets - 1)
        } else {
            0
        };
        histogram[idx].count += 1;
    }

    histogram
}

pub fn write_histogram_png(
    output_path: &str,
    buckets: &[HistogramBucket],
) -> Result<(), HistogramError> {
    if buckets.is_empty() {
        return Ok(());
    }

    let max_count = buckets.iter().map(|bucket| bucket.count).max().unwrap_or(1);
    let bucket_count = buckets.len() as i32;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Weekly Profit Distribution", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..bucket_count, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Weekly profit ($)")
        .y_desc("Iterations")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(buckets.len().min(10))
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            buckets
                .get(*index as usize)
                .map(|bucket| format!("{:.0}", bucket.midpoint))
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let profit_style = ShapeStyle::from(&RGBColor(46, 160, 67)).filled();
    let loss_style = ShapeStyle::from(&RGBColor(214, 57, 57)).filled();
    chart
        .draw_series(buckets.iter().enumerate().map(|(idx, bucket)| {
            let style = if bucket.midpoint >= 0.0 {
                profit_style
            } else {
                loss_style
            };
            Rectangle::new([(idx as i32, 0), (idx as i32 + 1, bucket.count)], style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
