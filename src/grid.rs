//! In-memory sample grids passed between the decoder, normalizer and writer

use crate::error::ConvertError;
use crate::types::{BitDepth, Dimensions};

/// One value per pixel from the first frame of a source image, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    dimensions: Dimensions,
    bit_depth: BitDepth,
    samples: Vec<f32>,
}

impl SampleGrid {
    /// Build a grid, checking that the sample count matches the dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the sample count
    /// differs from `rows * cols`
    pub fn new(dimensions: Dimensions, bit_depth: BitDepth, samples: Vec<f32>) -> Result<Self, ConvertError> {
        if !dimensions.is_valid() {
            return Err(ConvertError::EmptyGrid);
        }

        if samples.len() != dimensions.pixel_count() {
            return Err(ConvertError::DimensionMismatch {
                dimensions,
                expected: dimensions.pixel_count(),
                actual: samples.len(),
            });
        }

        Ok(Self {
            dimensions,
            bit_depth,
            samples,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline(always)]
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.dimensions.rows
    }

    #[inline(always)]
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.dimensions.cols
    }

    #[inline(always)]
    #[must_use]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    #[inline(always)]
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// 8-bit grayscale pixels with the same dimensions as their source grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    dimensions: Dimensions,
    pixels: Vec<u8>,
}

impl NormalizedImage {
    pub(crate) fn new(dimensions: Dimensions, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), dimensions.pixel_count());
        Self { dimensions, pixels }
    }

    #[inline(always)]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        u32::from(self.dimensions.cols)
    }

    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        u32::from(self.dimensions.rows)
    }

    #[inline(always)]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
