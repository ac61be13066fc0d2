use super::window::IntensityWindow;
use crate::error::ConvertError;
use crate::grid::{NormalizedImage, SampleGrid};

/// Stretch a sample grid onto 0-255 using its percentile window
///
/// # Errors
///
/// Returns an error if the grid holds no samples
pub fn normalize(grid: &SampleGrid) -> Result<NormalizedImage, ConvertError> {
    let window = IntensityWindow::from_samples(grid.samples())?;
    Ok(normalize_with_window(grid, &window))
}

/// Map every sample through `window` and truncate to 8 bits
#[must_use]
pub fn normalize_with_window(grid: &SampleGrid, window: &IntensityWindow) -> NormalizedImage {
    let pixels = grid
        .samples()
        .iter()
        .map(|&sample| scale_to_u8(window.scale(sample)))
        .collect();

    NormalizedImage::new(grid.dimensions(), pixels)
}

#[inline(always)]
fn scale_to_u8(unit: f64) -> u8 {
    // Saturating cast truncates towards zero, unit is already clamped
    (unit * 255.0_f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BitDepth, Dimensions};

    fn grid(rows: u16, cols: u16, samples: Vec<f32>) -> SampleGrid {
        SampleGrid::new(Dimensions::new(rows, cols), BitDepth::new(16, 12), samples).unwrap()
    }

    /// Deterministic pseudo-random 12-bit samples
    fn noise(count: usize, seed: u64) -> Vec<f32> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
                ((state >> 33) % 4096) as f32
            })
            .collect()
    }

    #[test]
    fn test_dimensions_are_preserved() {
        let source = grid(37, 53, noise(37 * 53, 1));
        let image = normalize(&source).unwrap();
        assert_eq!(image.dimensions(), source.dimensions());
        assert_eq!(image.pixels().len(), 37 * 53);
        assert_eq!(image.width(), 53);
        assert_eq!(image.height(), 37);
    }

    #[test]
    fn test_full_range_is_reached() {
        let source = grid(64, 64, noise(64 * 64, 7));
        let image = normalize(&source).unwrap();
        assert_eq!(image.pixels().iter().min(), Some(&0));
        assert_eq!(image.pixels().iter().max(), Some(&255));
    }

    #[test]
    fn test_constant_grid_maps_to_zero() {
        let source = grid(10, 10, vec![1234.0; 100]);
        let image = normalize(&source).unwrap();
        assert!(image.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_monotonic_for_unclipped_samples() {
        let samples = noise(50 * 50, 3);
        let source = grid(50, 50, samples.clone());
        let window = IntensityWindow::from_samples(&samples).unwrap();
        let image = normalize_with_window(&source, &window);

        let mut pairs: Vec<(f32, u8)> = samples
            .iter()
            .copied()
            .zip(image.pixels().iter().copied())
            .filter(|&(s, _)| f64::from(s) > window.low() && f64::from(s) < window.high())
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in pairs.windows(2) {
            assert!(pair[1].1 >= pair[0].1, "{:?} maps below {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_outliers_do_not_wash_out_bulk() {
        let samples = noise(100 * 100, 11);
        let clean = normalize(&grid(100, 100, samples.clone())).unwrap();

        // Fewer than 1% of samples become extreme outliers
        let mut noisy = samples.clone();
        let outliers: Vec<usize> = (0..noisy.len()).step_by(200).collect();
        for (n, &idx) in outliers.iter().enumerate() {
            noisy[idx] = if n % 2 == 0 { 1_000_000.0 } else { -1_000_000.0 };
        }
        let perturbed = normalize(&grid(100, 100, noisy)).unwrap();

        let max_shift = clean
            .pixels()
            .iter()
            .zip(perturbed.pixels())
            .enumerate()
            .filter(|(idx, _)| !outliers.contains(idx))
            .map(|(_, (&a, &b))| a.abs_diff(b))
            .max()
            .unwrap();
        assert!(max_shift <= 3, "bulk pixels shifted by {max_shift}");
    }

    #[test]
    fn test_uniform_12bit_grid_uses_most_levels() {
        let samples: Vec<f32> = (0..100 * 100).map(|i| (i % 4096) as f32).collect();
        let image = normalize(&grid(100, 100, samples)).unwrap();

        let mut seen = [false; 256];
        for &p in image.pixels() {
            seen[usize::from(p)] = true;
        }
        assert!(seen.iter().filter(|&&s| s).count() >= 250);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let source = grid(20, 30, noise(600, 5));
        assert_eq!(normalize(&source).unwrap(), normalize(&source).unwrap());
    }
}
