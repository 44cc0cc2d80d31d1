//! Order-statistic helpers for already-sorted slices.
//!
//! The estimator reads the element at `floor(len * fraction)` without
//! interpolating between neighbours, so a given seed and sample count always
//! map to one specific sample.
//!
//! - Empty input => `None` (or `0.0` for the f64 convenience wrapper).
//! - `fraction <= 0` => first element.
//! - Indices past the end clamp to the last element.

use serde::Serialize;

pub const P10: f64 = 0.1;
pub const P50: f64 = 0.5;
pub const P90: f64 = 0.9;

/// Returns the order statistic at `fraction` from a slice sorted ascending.
pub fn value_sorted<T: Copy>(sorted_values: &[T], fraction: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let last = sorted_values.len() - 1;
    let index = if fraction <= 0.0 {
        0
    } else {
        ((sorted_values.len() as f64 * fraction).floor() as usize).min(last)
    };

    sorted_values.get(index).copied()
}

/// Convenience wrapper for `f64` results.
pub fn value_f64_sorted(sorted_values: &[f64], fraction: f64) -> f64 {
    value_sorted(sorted_values, fraction).unwrap_or(0.0)
}

pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl PercentileBand {
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        Self {
            p10: value_f64_sorted(sorted_values, P10),
            p50: value_f64_sorted(sorted_values, P50),
            p90: value_f64_sorted(sorted_values, P90),
        }
    }
}
