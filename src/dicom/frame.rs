//! Reduction of the first frame to one sample per pixel
//!
//! Grayscale frames keep their stored values. Color frames are reduced to
//! luminance: RGB through BT.601 luma weights, YCbCr by taking Y directly.

use super::{DicomMetadata, PhotometricInterpretation};
use crate::grid::SampleGrid;
use crate::types::{BitDepth, PixelRepresentation};
use anyhow::{bail, Context, Result};

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Sample grid for the first frame of `metadata`'s pixel data
///
/// # Errors
///
/// Returns an error if the color space is unsupported or the pixel data is
/// shorter than one frame
pub fn first_frame_samples(metadata: &DicomMetadata) -> Result<SampleGrid> {
    let samples = match metadata.decoded_photometric() {
        PhotometricInterpretation::Monochrome1 | PhotometricInterpretation::Monochrome2 => {
            monochrome_samples(metadata)?
        }
        PhotometricInterpretation::Rgb => rgb_luma_samples(metadata)?,
        PhotometricInterpretation::YbrFull => ybr_full_luma_samples(metadata)?,
        PhotometricInterpretation::YbrFull422 => ybr_422_luma_samples(metadata)?,
        other => bail!("Unsupported photometric interpretation: {other}"),
    };

    SampleGrid::new(metadata.dimensions, metadata.bit_depth, samples)
        .context("Failed to build sample grid")
}

fn monochrome_samples(metadata: &DicomMetadata) -> Result<Vec<f32>> {
    decode_samples(
        metadata.pixel_data(),
        metadata.dimensions.pixel_count(),
        metadata.bit_depth,
        metadata.pixel_representation,
    )
}

fn rgb_luma_samples(metadata: &DicomMetadata) -> Result<Vec<f32>> {
    let pixel_count = metadata.dimensions.pixel_count();
    let values = decode_samples(
        metadata.pixel_data(),
        pixel_count * 3,
        metadata.bit_depth,
        metadata.pixel_representation,
    )?;

    let luma = |r: f32, g: f32, b: f32| LUMA_B.mul_add(b, LUMA_R.mul_add(r, LUMA_G * g));

    Ok(match metadata.decoded_planar_configuration() {
        Some(1) => {
            let (r, rest) = values.split_at(pixel_count);
            let (g, b) = rest.split_at(pixel_count);
            (0..pixel_count).map(|i| luma(r[i], g[i], b[i])).collect()
        }
        _ => values
            .chunks_exact(3)
            .map(|rgb| luma(rgb[0], rgb[1], rgb[2]))
            .collect(),
    })
}

fn ybr_full_luma_samples(metadata: &DicomMetadata) -> Result<Vec<f32>> {
    let pixel_count = metadata.dimensions.pixel_count();
    let values = decode_samples(
        metadata.pixel_data(),
        pixel_count * 3,
        metadata.bit_depth,
        metadata.pixel_representation,
    )?;

    Ok(match metadata.decoded_planar_configuration() {
        // Y plane comes first
        Some(1) => values[..pixel_count].to_vec(),
        _ => values.iter().step_by(3).copied().collect(),
    })
}

fn ybr_422_luma_samples(metadata: &DicomMetadata) -> Result<Vec<f32>> {
    if metadata.bits_allocated() != 8 {
        bail!(
            "Unsupported bits allocated for YBR_FULL_422: {} (expected 8)",
            metadata.bits_allocated()
        );
    }

    let rows = usize::from(metadata.rows());
    let cols = usize::from(metadata.cols());
    let pixel_count = rows * cols;
    let data = metadata.pixel_data();

    // Some decoders upsample the chroma, leaving a full YCbCr frame
    if data.len() >= pixel_count * 3 && metadata.number_of_frames == 1 {
        return ybr_full_luma_samples(metadata);
    }

    // Interleaved groups of Y0 Y1 Cb Cr cover two pixels
    let row_bytes = cols.div_ceil(2) * 4;
    let frame_bytes = row_bytes * rows;
    if data.len() < frame_bytes {
        bail!(
            "Invalid YBR_FULL_422 pixel data size: expected at least {frame_bytes} bytes for first frame, got {}",
            data.len()
        );
    }

    let mut samples = Vec::with_capacity(pixel_count);
    for y in 0..rows {
        let row = &data[y * row_bytes..(y + 1) * row_bytes];
        for x in 0..cols {
            samples.push(f32::from(row[(x / 2) * 4 + x % 2]));
        }
    }

    Ok(samples)
}

/// Decode the first `count` little-endian samples of `data`
fn decode_samples(
    data: &[u8],
    count: usize,
    bit_depth: BitDepth,
    representation: PixelRepresentation,
) -> Result<Vec<f32>> {
    let bytes_per_sample = bit_depth.bytes_per_sample();
    let expected_size = count * bytes_per_sample;

    if data.len() < expected_size {
        bail!(
            "Invalid pixel data size: expected at least {expected_size} bytes for first frame, got {}",
            data.len()
        );
    }

    let data = &data[..expected_size];
    let to_value = |raw: u32| stored_value(raw, bit_depth.stored, representation);

    Ok(match bit_depth.allocated {
        8 => data.iter().map(|&b| to_value(u32::from(b))).collect(),
        16 => data
            .chunks_exact(2)
            .map(|chunk| to_value(u32::from(u16::from_le_bytes([chunk[0], chunk[1]]))))
            .collect(),
        32 => data
            .chunks_exact(4)
            .map(|chunk| to_value(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect(),
        other => bail!("Unsupported bits allocated: {other}"),
    })
}

/// Interpret the low `bits_stored` bits of `raw`, sign-extending if signed
#[inline(always)]
fn stored_value(raw: u32, bits_stored: u16, representation: PixelRepresentation) -> f32 {
    let bits = u32::from(bits_stored.clamp(1, 32));
    let shift = 32 - bits;
    let masked = (raw << shift) >> shift;

    match representation {
        PixelRepresentation::Unsigned => masked as f32,
        PixelRepresentation::Signed => (((masked << shift) as i32) >> shift) as f32,
    }
}
