//! PNG output and output-directory layout

use crate::error::ConvertError;
use crate::grid::NormalizedImage;
use anyhow::{Context, Result};
use image::{GrayImage, ImageBuffer, ImageFormat};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension given to every converted file
pub const OUTPUT_EXTENSION: &str = "png";

/// Persists a normalized image at a destination path
pub trait ImageEncoder: Sync {
    /// Create or overwrite `path` with `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written
    fn encode(&self, image: &NormalizedImage, path: &Path) -> Result<()>;
}

/// Writes single-channel 8-bit PNG files
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl ImageEncoder for PngWriter {
    fn encode(&self, image: &NormalizedImage, path: &Path) -> Result<()> {
        let gray: GrayImage = ImageBuffer::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .context("Failed to create grayscale image buffer")?;

        gray.save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write PNG: {}", path.display()))?;

        debug!(path = %path.display(), "wrote {}x{} image", image.width(), image.height());
        Ok(())
    }
}

/// Destination for `source` directly under `output_root`
///
/// Source subdirectories are flattened away, so files sharing a base name
/// map to the same destination.
#[must_use]
pub fn output_path_for(source: &Path, output_root: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .map_or_else(OsString::new, OsString::from);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_root.join(name)
}

/// Create the output root if absent and check that it can receive files
///
/// Safe to call repeatedly and from several threads.
///
/// # Errors
///
/// Returns an error if the root cannot be created, is not a directory, or
/// a file cannot be created inside it
pub fn prepare_output_root(output_root: &Path) -> Result<(), ConvertError> {
    match std::fs::create_dir_all(output_root) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists && output_root.is_dir() => {}
        Err(source) => {
            return Err(if output_root.exists() && !output_root.is_dir() {
                ConvertError::OutputRootNotDirectory(output_root.to_path_buf())
            } else {
                ConvertError::OutputRootCreate {
                    path: output_root.to_path_buf(),
                    source,
                }
            });
        }
    }

    let metadata = std::fs::metadata(output_root).map_err(|source| ConvertError::OutputRootCreate {
        path: output_root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(ConvertError::OutputRootNotDirectory(output_root.to_path_buf()));
    }

    // A scratch file must be creatable by this process
    tempfile::NamedTempFile::new_in(output_root)
        .map(drop)
        .map_err(|source| ConvertError::OutputRootReadOnly {
            path: output_root.to_path_buf(),
            source,
        })
}
