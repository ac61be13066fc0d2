use crate::batch::BatchOptions;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Batch-convert DICOM files into 8-bit grayscale PNG previews
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory searched recursively for .dcm files
    #[arg(value_name = "INPUT_ROOT")]
    pub input_root: PathBuf,

    /// Directory receiving the converted .png files
    #[arg(value_name = "OUTPUT_ROOT")]
    pub output_root: PathBuf,

    /// Number of files converted in parallel
    #[arg(short, long, default_value = "1", value_name = "N")]
    pub jobs: NonZeroUsize,

    /// Log per-file details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    #[must_use]
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            jobs: self.jobs.get(),
            ..BatchOptions::default()
        }
    }
}
