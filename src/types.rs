//! Domain-specific types shared by the decoder and the normalizer

use dicom::transfer_syntax::entries;
use std::fmt;

/// DICOM transfer syntax (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    pub uid: String,
    pub name: String,
}

impl TransferSyntax {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }

    #[inline]
    #[must_use]
    #[allow(deprecated)] // Explicit VR Big Endian is retired but still in use
    pub fn is_big_endian(&self) -> bool {
        self.uid.trim_end_matches('\0') == entries::EXPLICIT_VR_BIG_ENDIAN.uid()
    }

    /// Native (uncompressed) encodings keep pixel data as plain sample arrays
    #[inline]
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        let uid = self.uid.trim_end_matches('\0');
        uid.starts_with("1.2.840.10008.1.2.4")   // JPEG family, JPEG-LS, JPEG 2000
            || uid.starts_with("1.2.840.10008.1.2.5") // RLE lossless
    }

    /// JPEG-family decoders hand back colour data already converted to RGB
    #[inline]
    #[must_use]
    pub fn decodes_to_rgb(&self) -> bool {
        self.uid.trim_end_matches('\0').starts_with("1.2.840.10008.1.2.4")
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

/// SOP Class (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SOPClass {
    pub uid: String,
    pub name: String,
}

impl SOPClass {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }
}

impl fmt::Display for SOPClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u16,
    pub cols: u16,
}

impl Dimensions {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rows > 0 && self.cols > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{cols}x{rows}", cols = self.cols, rows = self.rows)
    }
}

/// Bit depth information for pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepth {
    pub allocated: u16,
    pub stored: u16,
}

impl BitDepth {
    #[must_use]
    pub fn new(allocated: u16, stored: u16) -> Self {
        Self { allocated, stored }
    }

    #[inline]
    #[must_use]
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.allocated / 8)
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.stored > 0 && self.stored <= self.allocated
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{stored}/{allocated} bits",
            stored = self.stored,
            allocated = self.allocated
        )
    }
}

/// Whether stored sample values are two's complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelRepresentation {
    #[default]
    Unsigned,
    Signed,
}

impl PixelRepresentation {
    #[must_use]
    pub fn from_tag_value(value: u16) -> Self {
        if value == 1 { Self::Signed } else { Self::Unsigned }
    }
}

impl fmt::Display for PixelRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "unsigned"),
            Self::Signed => write!(f, "signed"),
        }
    }
}
