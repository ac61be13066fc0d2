//! Photometric interpretation (color space)

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    /// Grayscale where min value = white, max value = black
    Monochrome1,
    /// Grayscale where min value = black, max value = white
    Monochrome2,
    Rgb,
    YbrFull,
    /// YCbCr with horizontally subsampled chroma
    YbrFull422,
    Palette,
}

impl FromStr for PhotometricInterpretation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('\0').trim() {
            "MONOCHROME1" => Ok(Self::Monochrome1),
            "MONOCHROME2" => Ok(Self::Monochrome2),
            "RGB" => Ok(Self::Rgb),
            "YBR_FULL" => Ok(Self::YbrFull),
            "YBR_FULL_422" => Ok(Self::YbrFull422),
            "PALETTE COLOR" => Ok(Self::Palette),
            _ => Err(()),
        }
    }
}

impl PhotometricInterpretation {
    #[inline(always)]
    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::Monochrome1 | Self::Monochrome2)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_ycbcr(&self) -> bool {
        matches!(self, Self::YbrFull | Self::YbrFull422)
    }

    /// Three samples per pixel
    #[inline(always)]
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.is_rgb() || self.is_ycbcr()
    }
}

impl Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monochrome1 => write!(f, "MONOCHROME1"),
            Self::Monochrome2 => write!(f, "MONOCHROME2"),
            Self::Rgb => write!(f, "RGB"),
            Self::YbrFull => write!(f, "YBR_FULL"),
            Self::YbrFull422 => write!(f, "YBR_FULL_422"),
            Self::Palette => write!(f, "PALETTE COLOR"),
        }
    }
}
