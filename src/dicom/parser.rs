use super::DicomObject;
use crate::types::{BitDepth, Dimensions, PixelRepresentation, SOPClass, TransferSyntax};
use anyhow::{Context, Result};
use dicom::core::dictionary::UidDictionary;
use dicom::dictionary_std::sop_class;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::transfer_syntax::TransferSyntaxRegistry;

/// Partial metadata for error message context
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
}

impl ErrorContext {
    pub fn format_error(&self, tag_name: &str) -> String {
        let mut parts = Vec::new();

        if let Some(modality) = &self.modality {
            parts.push(format!("Modality: {modality}"));
        }

        if let Some(sc) = &self.sop_class {
            parts.push(format!("SOP Class: {sc}")); // Uses Display: "Name (UID)"
        }

        if parts.is_empty() {
            format!("Missing or invalid {tag_name} tag")
        } else {
            format!(
                "Missing or invalid {tag_name} tag - this may be a non-image DICOM file ({})",
                parts.join(", ")
            )
        }
    }
}

impl From<&DicomObject> for ErrorContext {
    fn from(obj: &DicomObject) -> Self {
        ErrorContext {
            modality: extract_modality(obj),
            sop_class: extract_sop_class(obj),
        }
    }
}

pub fn extract_dimensions(obj: &DicomObject, error_context: &ErrorContext) -> Result<Dimensions> {
    let rows = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Rows"))?;

    let cols = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Columns"))?;

    Ok(Dimensions::new(rows, cols))
}

#[inline]
pub fn extract_number_of_frames(obj: &DicomObject) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &DicomObject) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

pub fn extract_bit_depth(obj: &DicomObject, error_context: &ErrorContext) -> Result<BitDepth> {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Bits Allocated"))?;

    // Missing Bits Stored falls back to the allocation
    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    Ok(BitDepth::new(allocated, stored))
}

#[inline]
pub fn extract_pixel_representation(obj: &DicomObject) -> PixelRepresentation {
    obj.get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
        .map(PixelRepresentation::from_tag_value)
        .unwrap_or_default()
}

#[inline]
pub fn extract_planar_configuration(obj: &DicomObject) -> Option<u16> {
    obj.get(tags::PLANAR_CONFIGURATION)
        .and_then(|e| e.to_int::<u16>().ok())
}

pub fn extract_transfer_syntax(obj: &DicomObject) -> TransferSyntax {
    let uid = obj.meta().transfer_syntax().trim_end_matches('\0').to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

pub fn extract_sop_class(obj: &DicomObject) -> Option<SOPClass> {
    obj.get(tags::SOP_CLASS_UID)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|uid| {
            let uid = uid.trim_end_matches('\0');
            sop_class::StandardSopClassDictionary
                .by_uid(uid)
                .map(|entry| SOPClass::new(uid.to_string(), entry.name.to_string()))
        })
}

pub fn extract_modality(obj: &DicomObject) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_without_metadata() {
        let context = ErrorContext::default();
        assert_eq!(context.format_error("Rows"), "Missing or invalid Rows tag");
    }

    #[test]
    fn test_error_context_mentions_non_image_hint() {
        let context = ErrorContext {
            modality: Some("RTSTRUCT".to_string()),
            sop_class: Some(SOPClass::new(
                "1.2.840.10008.5.1.4.1.1.481.3".to_string(),
                "RT Structure Set Storage".to_string(),
            )),
        };

        assert_eq!(
            context.format_error("Columns"),
            "Missing or invalid Columns tag - this may be a non-image DICOM file \
             (Modality: RTSTRUCT, SOP Class: RT Structure Set Storage (1.2.840.10008.5.1.4.1.1.481.3))"
        );
    }
}
