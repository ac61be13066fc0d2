use anyhow::{bail, Result};
use crate::dicom::PhotometricInterpretation;
use crate::types::BitDepth;

#[inline]
pub fn validate_photometric_samples(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<()> {
    let is_valid = match (photometric_interpretation, samples_per_pixel) {
        (pi, 1) if pi.is_grayscale() => true,
        (pi, 3) if pi.is_color() => true,
        _ => false,
    };

    if !is_valid {
        bail!(
            "Unsupported photometric interpretation {photometric_interpretation} with samples per pixel {samples_per_pixel}"
        );
    }

    Ok(())
}

#[inline]
pub fn validate_planar_configuration(
    planar_configuration: Option<u16>,
    photometric_interpretation: &PhotometricInterpretation,
) -> Result<()> {
    match planar_configuration {
        None => Ok(()),
        Some(_) if !photometric_interpretation.is_color() => {
            bail!("Planar configuration should only be present for RGB or YCbCr images")
        }
        Some(0 | 1) => Ok(()),
        Some(other) => bail!("Unsupported planar configuration: {other}"),
    }
}

#[inline]
pub fn validate_bit_depth(bit_depth: BitDepth) -> Result<()> {
    if !matches!(bit_depth.allocated, 8 | 16 | 32) {
        bail!(
            "Unsupported bits allocated: {} (expected 8, 16, or 32)",
            bit_depth.allocated
        );
    }

    if !bit_depth.is_valid() {
        bail!("Invalid bit depth: {bit_depth}");
    }

    Ok(())
}

pub fn validate_metadata(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
    planar_configuration: Option<u16>,
    bit_depth: BitDepth,
) -> Result<()> {
    validate_photometric_samples(photometric_interpretation, samples_per_pixel)?;
    validate_planar_configuration(planar_configuration, photometric_interpretation)?;
    validate_bit_depth(bit_depth)?;
    Ok(())
}
