//! Recursive discovery of source files

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of source files, matched case-insensitively
pub const SOURCE_EXTENSION: &str = ".dcm";

/// Lazily walk `input_root`, yielding every DICOM file beneath it
///
/// Entries within a directory are visited in file-name order. Traversal
/// errors are yielded in place and should end the run.
pub fn scan(input_root: &Path) -> impl Iterator<Item = Result<PathBuf, ConvertError>> + use<> {
    WalkDir::new(input_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => is_source_file(&entry).then(|| Ok(entry.into_path())),
            Err(e) => Some(Err(ConvertError::Traversal(e))),
        })
}

fn is_source_file(entry: &DirEntry) -> bool {
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());

    is_file && has_source_extension(&entry.file_name().to_string_lossy())
}

#[inline]
#[must_use]
pub fn has_source_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(SOURCE_EXTENSION)
}
