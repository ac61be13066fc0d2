//! DICOM file parsing and sample extraction
//!
//! This module opens DICOM files, extracts the metadata needed to interpret
//! the pixel data, and reduces the first frame to a `SampleGrid`.

mod frame;
mod metadata;
mod parser;
mod photometric;
mod pixel_data;
mod validation;

// Re-export public API
pub use frame::first_frame_samples;
pub use metadata::DicomMetadata;
pub use photometric::PhotometricInterpretation;

use crate::grid::SampleGrid;
use anyhow::{Context, Result};
use dicom::dictionary_std::tags;
use dicom::object::{open_file, FileDicomObject, InMemDicomObject, StandardDataDictionary};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A parsed DICOM file held in memory
pub type DicomObject = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Turns a source file into a grid of raw samples
pub trait SampleDecoder: Sync {
    /// Decode the first frame of `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    fn decode(&self, path: &Path) -> Result<SampleGrid>;
}

/// `SampleDecoder` backed by dicom-rs
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomDecoder;

impl SampleDecoder for DicomDecoder {
    fn decode(&self, path: &Path) -> Result<SampleGrid> {
        let obj = open_dicom_file(path)?;
        let metadata = extract_dicom_data(&obj)?;

        debug!(
            path = %path.display(),
            dimensions = %metadata.dimensions,
            photometric = %metadata.photometric_interpretation,
            bit_depth = %metadata.bit_depth,
            representation = %metadata.pixel_representation,
            frames = metadata.number_of_frames,
            transfer_syntax = %metadata.transfer_syntax,
            modality = metadata.modality.as_deref().unwrap_or("-"),
            sop_class = %metadata.sop_class.as_ref().map_or_else(|| "-".to_string(), ToString::to_string),
            "decoded DICOM metadata"
        );

        first_frame_samples(&metadata)
    }
}

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> Result<DicomObject> {
    open_file(file_path)
        .with_context(|| format!("Failed to open DICOM file: {}", file_path.display()))
}

/// Extract metadata and pixel data from a DICOM object
pub fn extract_dicom_data(obj: &DicomObject) -> Result<DicomMetadata> {
    let error_context = parser::ErrorContext::from(obj);

    let dimensions = parser::extract_dimensions(obj, &error_context)?;
    let number_of_frames = parser::extract_number_of_frames(obj);
    let samples_per_pixel = parser::extract_samples_per_pixel(obj);
    let bit_depth = parser::extract_bit_depth(obj, &error_context)?;
    let pixel_representation = parser::extract_pixel_representation(obj);
    let planar_configuration = parser::extract_planar_configuration(obj);
    let transfer_syntax = parser::extract_transfer_syntax(obj);

    let photometric_interpretation = obj
        .get(tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| {
            let s_str = s.as_ref();
            PhotometricInterpretation::from_str(s_str)
                .map_err(|()| anyhow::anyhow!("Unknown photometric interpretation: {s_str}"))
        })
        .transpose()
        .context("Failed to parse photometric interpretation")?
        .unwrap_or(PhotometricInterpretation::Monochrome2); // Default to Monochrome2

    if !dimensions.is_valid() {
        anyhow::bail!("Image has no pixels: {dimensions}");
    }

    // Validate before touching the pixel data
    validation::validate_metadata(
        &photometric_interpretation,
        samples_per_pixel,
        planar_configuration,
        bit_depth,
    )?;

    let pixel_data = pixel_data::extract_pixel_data(
        obj,
        bit_depth.allocated,
        &photometric_interpretation,
        &transfer_syntax,
    )?;

    Ok(DicomMetadata {
        dimensions,
        number_of_frames,
        photometric_interpretation,
        samples_per_pixel,
        bit_depth,
        pixel_representation,
        planar_configuration,
        pixel_data,
        modality: error_context.modality,
        sop_class: error_context.sop_class,
        transfer_syntax,
    })
}
