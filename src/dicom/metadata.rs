//! DICOM metadata structure

use crate::types::*;
use super::photometric::PhotometricInterpretation;

/// Image metadata and first-frame-capable pixel bytes extracted from a file
#[derive(Debug, Clone)]
pub struct DicomMetadata {
    pub dimensions: Dimensions,
    pub number_of_frames: u32, // Number of frames (default 1 for single-frame)

    // Photometric interpretation and sample layout
    pub photometric_interpretation: PhotometricInterpretation,
    pub samples_per_pixel: u16,            // 1 for grayscale, 3 for color
    pub bit_depth: BitDepth,
    pub pixel_representation: PixelRepresentation,
    pub planar_configuration: Option<u16>, // 0 = interleaved, 1 = planar (color only)

    // Pixel data as little-endian bytes, all frames
    pub pixel_data: Vec<u8>,

    // Descriptive metadata, logged only
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
    pub transfer_syntax: TransferSyntax,
}

impl DicomMetadata {
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
    pub fn bits_allocated(&self) -> u16 {
        self.bit_depth.allocated
    }

    #[inline(always)]
    #[must_use]
    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    /// Color space of `pixel_data`, which differs from the file's declared
    /// one when a JPEG decoder already converted YCbCr to RGB
    #[must_use]
    pub fn decoded_photometric(&self) -> PhotometricInterpretation {
        if self.photometric_interpretation.is_ycbcr() && self.transfer_syntax.decodes_to_rgb() {
            PhotometricInterpretation::Rgb
        } else {
            self.photometric_interpretation.clone()
        }
    }

    /// Planar configuration of `pixel_data`; decoded compressed data is
    /// always interleaved
    #[must_use]
    pub fn decoded_planar_configuration(&self) -> Option<u16> {
        if self.transfer_syntax.is_compressed() {
            None
        } else {
            self.planar_configuration
        }
    }
}
