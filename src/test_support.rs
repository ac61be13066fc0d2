//! Synthetic DICOM files for tests

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::Path;

/// Minimal single-frame grayscale image description
pub struct SyntheticDicom {
    pub rows: u16,
    pub cols: u16,
    pub bits_stored: u16,
    pub samples: Vec<u16>,
    pub photometric: &'static str,
    pub omit_rows: bool,
}

impl SyntheticDicom {
    /// 16-bit allocated, 12-bit stored MONOCHROME2 image
    pub fn mono16(rows: u16, cols: u16, samples: &[u16]) -> Self {
        assert_eq!(samples.len(), usize::from(rows) * usize::from(cols));
        Self {
            rows,
            cols,
            bits_stored: 12,
            samples: samples.to_vec(),
            photometric: "MONOCHROME2",
            omit_rows: false,
        }
    }
}

/// Write `image` as an Explicit VR Little Endian Secondary Capture file
pub fn write_dicom(path: &Path, image: &SyntheticDicom) {
    let mut obj = InMemDicomObject::new_empty();

    obj.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE),
    ));
    obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from("2.25.1234567890")));
    obj.put(DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("OT")));
    obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
    obj.put(DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from(image.photometric)));
    if !image.omit_rows {
        obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(image.rows)));
    }
    obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(image.cols)));
    obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(image.bits_stored)));
    obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(image.bits_stored - 1)));
    obj.put(DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)));
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(image.samples.clone().into()),
    ));

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
                .media_storage_sop_instance_uid("2.25.1234567890"),
        )
        .expect("Failed to build file meta table");

    file_obj.write_to_file(path).expect("Failed to write synthetic DICOM file");
}

/// 100x100 samples spread evenly over the 12-bit range
pub fn uniform_12bit_100x100() -> Vec<u16> {
    (0..100 * 100_u32).map(|i| ((i * 4095) / 9999) as u16).collect()
}
