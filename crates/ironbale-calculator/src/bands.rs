//! Threshold banding shared by every estimator status.
//!
//! Bands are upper-inclusive: a value exactly equal to a threshold belongs to
//! the band below it. A NaN value compares false against every threshold and
//! lands in the last band.

use serde::{Deserialize, Serialize};

/// Ascending thresholds and the `thresholds.len() + 1` labels they separate.
#[derive(Debug, Clone, Copy)]
pub struct Bands<'a, T> {
    thresholds: &'a [f64],
    labels: &'a [T],
}

impl<'a, T: Copy> Bands<'a, T> {
    pub const fn new(thresholds: &'a [f64], labels: &'a [T]) -> Self {
        Self { thresholds, labels }
    }

    /// Returns the label of the band containing `value`.
    pub fn classify(&self, value: f64) -> T {
        debug_assert_eq!(self.labels.len(), self.thresholds.len() + 1);
        debug_assert!(self.thresholds.windows(2).all(|w| w[0] <= w[1]));

        let index = self
            .thresholds
            .iter()
            .position(|&threshold| value <= threshold)
            .unwrap_or(self.thresholds.len());
        self.labels[index.min(self.labels.len() - 1)]
    }

    pub fn thresholds(&self) -> &'a [f64] {
        self.thresholds
    }
}

/// How well a piece of equipment fits the load placed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    Oversized,
    Acceptable,
    Optimal,
    Undersized,
}

/// Labels for load-percentage bands: lightly loaded equipment is oversized,
/// anything above the last threshold is undersized.
pub const LOAD_LABELS: [CapacityStatus; 4] = [
    CapacityStatus::Oversized,
    CapacityStatus::Acceptable,
    CapacityStatus::Optimal,
    CapacityStatus::Undersized,
];
