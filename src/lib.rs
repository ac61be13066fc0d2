pub mod batch;
pub mod cli;
pub mod dicom;
pub mod error;
pub mod grid;
pub mod image;
pub mod logger;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use crate::batch::{convert_batch, BatchOptions, CancellationToken, ConversionReport};
pub use crate::dicom::{DicomDecoder, SampleDecoder};
pub use crate::error::{ConvertError, FileFailure, Stage};
pub use crate::grid::{NormalizedImage, SampleGrid};
pub use crate::image::{normalize, ImageEncoder, IntensityWindow, PngWriter};
