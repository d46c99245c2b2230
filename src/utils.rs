//! Utility functions shared by the balancers and the skill model

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Calculate the absolute difference between two team totals
pub fn score_difference(sum1: f64, sum2: f64) -> f64 {
    (sum1 - sum2).abs()
}

/// Arithmetic mean, or 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sizes of the two teams for a roster of `n` players: `(floor(n/2), ceil(n/2))`
pub fn team_sizes(n: usize) -> (usize, usize) {
    (n / 2, n - n / 2)
}
