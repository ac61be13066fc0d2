//! Intensity normalization and raster output

mod normalization;
mod window;
mod writer;

pub use normalization::{normalize, normalize_with_window};
pub use window::{percentile, IntensityWindow, EPSILON, HIGH_PERCENTILE, LOW_PERCENTILE};
pub use writer::{output_path_for, prepare_output_root, ImageEncoder, PngWriter, OUTPUT_EXTENSION};
