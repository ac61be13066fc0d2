//! Percentile-based intensity window

use crate::error::ConvertError;
use std::fmt;

/// Lower percentile of the window
pub const LOW_PERCENTILE: f64 = 1.0;
/// Upper percentile of the window
pub const HIGH_PERCENTILE: f64 = 99.0;
/// Added to the window width so a constant image never divides by zero
pub const EPSILON: f64 = 1e-6;

/// Input range mapped linearly onto the full 8-bit output range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityWindow {
    low: f64,
    high: f64,
}

impl IntensityWindow {
    /// Window between the 1st and 99th percentile of `samples`
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::EmptyGrid` if there are no samples
    pub fn from_samples(samples: &[f32]) -> Result<Self, ConvertError> {
        if samples.is_empty() {
            return Err(ConvertError::EmptyGrid);
        }

        let mut sorted: Vec<f64> = samples.iter().map(|&s| f64::from(s)).collect();
        sorted.sort_unstable_by(f64::total_cmp);

        Ok(Self {
            low: percentile(&sorted, LOW_PERCENTILE),
            high: percentile(&sorted, HIGH_PERCENTILE),
        })
    }

    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    #[inline(always)]
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline(always)]
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Position of `sample` inside the window, clamped to [0, 1]
    #[inline(always)]
    #[must_use]
    // Hot path: called for every pixel during conversion
    pub fn scale(&self, sample: f32) -> f64 {
        let width = self.high - self.low + EPSILON;
        ((f64::from(sample) - self.low) / width).clamp(0.0, 1.0)
    }
}

impl fmt::Display for IntensityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{low}, {high}]", low = self.low, high = self.high)
    }
}

/// Percentile `p` (0-100) of an ascending slice, interpolating linearly
/// between the two closest ranks
///
/// The slice must be non-empty and sorted.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());

    let last = sorted.len() - 1;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
