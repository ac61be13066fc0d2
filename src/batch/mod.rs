//! Batch conversion of a directory tree
//!
//! Every DICOM file under the input root is decoded, normalized and written
//! as a PNG directly under the output root. Setup problems abort the run;
//! problems with individual files are recorded in the report and the batch
//! moves on.

mod report;
mod scanner;

pub use report::ConversionReport;
pub use scanner::{has_source_extension, scan, SOURCE_EXTENSION};

use crate::dicom::SampleDecoder;
use crate::error::{ConvertError, FileFailure, Stage};
use crate::image::{self, output_path_for, prepare_output_root, ImageEncoder};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Cooperative stop signal, checked between files
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Knobs for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Worker threads; 1 converts sequentially in traversal order
    pub jobs: usize,
    pub cancellation: CancellationToken,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            cancellation: CancellationToken::new(),
        }
    }
}

/// Convert every DICOM file under `input_root` into a PNG in `output_root`
///
/// # Errors
///
/// Returns an error if the input root is missing or unreadable, the output
/// root cannot be prepared, or the worker pool cannot be built. Per-file
/// failures are reported in the returned `ConversionReport` instead.
pub fn convert_batch(
    input_root: &Path,
    output_root: &Path,
    decoder: &dyn SampleDecoder,
    encoder: &dyn ImageEncoder,
    options: &BatchOptions,
) -> Result<ConversionReport, ConvertError> {
    check_input_root(input_root)?;
    prepare_output_root(output_root)?;

    let sources = scan(input_root).collect::<Result<Vec<_>, _>>()?;
    info!(count = sources.len(), root = %input_root.display(), "found DICOM files");
    warn_on_collisions(&sources);

    let converted = AtomicUsize::new(0);
    let failures = Mutex::new(Vec::new());
    let cancellation = &options.cancellation;

    let process = |source: &PathBuf| {
        if cancellation.is_cancelled() {
            return;
        }

        match convert_file(source, output_root, decoder, encoder) {
            Ok(destination) => {
                converted.fetch_add(1, Ordering::Relaxed);
                debug!(source = %source.display(), destination = %destination.display(), "converted");
            }
            Err(failure) => {
                warn!("Skipping {}: {}", failure.path.display(), failure.reason);
                failures
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .push(failure);
            }
        }
    };

    if options.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()?;
        pool.install(|| sources.par_iter().for_each(process));
    } else {
        sources.iter().for_each(process);
    }

    let mut failures = failures
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ConversionReport {
        converted: converted.into_inner(),
        failures,
        cancelled: cancellation.is_cancelled(),
    })
}

/// Decode, normalize and write one file, returning its destination
///
/// # Errors
///
/// Returns a `FileFailure` naming the stage that failed
pub fn convert_file(
    source: &Path,
    output_root: &Path,
    decoder: &dyn SampleDecoder,
    encoder: &dyn ImageEncoder,
) -> Result<PathBuf, FileFailure> {
    let fail = |stage, error: &anyhow::Error| FileFailure::new(source.to_path_buf(), stage, error);

    let grid = decoder.decode(source).map_err(|e| fail(Stage::Decode, &e))?;

    let normalized = image::normalize(&grid).map_err(|e| fail(Stage::Normalize, &anyhow::Error::from(e)))?;

    let destination = output_path_for(source, output_root);
    encoder
        .encode(&normalized, &destination)
        .map_err(|e| fail(Stage::Write, &e))?;

    Ok(destination)
}

fn check_input_root(input_root: &Path) -> Result<(), ConvertError> {
    if !input_root.exists() {
        return Err(ConvertError::InputRootMissing(input_root.to_path_buf()));
    }

    if !input_root.is_dir() {
        return Err(ConvertError::InputRootNotDirectory(input_root.to_path_buf()));
    }

    Ok(())
}

/// Flattening maps same-named files onto one output; the last one wins
fn warn_on_collisions(sources: &[PathBuf]) {
    let mut seen: HashMap<PathBuf, &PathBuf> = HashMap::new();

    for source in sources {
        let destination = output_path_for(source, Path::new(""));
        if let Some(previous) = seen.insert(destination.clone(), source) {
            warn!(
                "{} and {} both convert to {}; the later file overwrites the earlier",
                previous.display(),
                source.display(),
                destination.display()
            );
        }
    }
}
