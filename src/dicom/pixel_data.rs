//! DICOM pixel data extraction
//!
//! Handles compression detection and endianness conversion. Whatever the
//! source encoding, the returned bytes hold little-endian samples.

use super::DicomObject;
use super::PhotometricInterpretation;
use crate::types::TransferSyntax;
use anyhow::{Context, Result};
use dicom::dictionary_std::tags;
use dicom::pixeldata::PixelDecoder;

/// Extract pixel data from DICOM object, handling compression and endianness
pub fn extract_pixel_data(
    obj: &DicomObject,
    bits_allocated: u16,
    photometric_interpretation: &PhotometricInterpretation,
    transfer_syntax: &TransferSyntax,
) -> Result<Vec<u8>> {
    let is_compressed = transfer_syntax.is_compressed();
    let needs_raw_fallback = !is_compressed
        && (photometric_interpretation.is_ycbcr() || bits_allocated == 32);

    if transfer_syntax.is_big_endian() && bits_allocated > 8 {
        extract_big_endian(obj, bits_allocated)
    } else if needs_raw_fallback {
        extract_raw_pixel_data(obj)
    } else {
        extract_decoded_pixel_data(obj)
    }
}

/// Extract big-endian 16/32-bit pixel data and convert to little-endian
fn extract_big_endian(obj: &DicomObject, bits_allocated: u16) -> Result<Vec<u8>> {
    let raw_bytes = extract_raw_pixel_data(obj)?;
    let width = usize::from(bits_allocated / 8);

    if !raw_bytes.len().is_multiple_of(width) {
        anyhow::bail!("Invalid {bits_allocated}-bit pixel data length: {}", raw_bytes.len());
    }

    Ok(raw_bytes
        .chunks_exact(width)
        .flat_map(|chunk| chunk.iter().rev().copied())
        .collect())
}

/// Extract raw pixel data (for uncompressed YCbCr, 32-bit and big-endian)
fn extract_raw_pixel_data(obj: &DicomObject) -> Result<Vec<u8>> {
    let pixel_data_obj = obj
        .get(tags::PIXEL_DATA)
        .context("Missing pixel data")?;

    Ok(pixel_data_obj
        .to_bytes()
        .context("Failed to get raw pixel data bytes")?
        .to_vec())
}

/// Extract decoded pixel data (handles compression)
fn extract_decoded_pixel_data(obj: &DicomObject) -> Result<Vec<u8>> {
    let decoded_pixel_data = obj
        .decode_pixel_data()
        .context("Failed to decode pixel data")?;

    // Raw samples; the conversion helpers would apply modality and VOI LUTs
    Ok(decoded_pixel_data.data().to_vec())
}
