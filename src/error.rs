use crate::types::Dimensions;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the library seams; setup variants abort a batch
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input root does not exist: {}", .0.display())]
    InputRootMissing(PathBuf),

    #[error("Input root is not a directory: {}", .0.display())]
    InputRootNotDirectory(PathBuf),

    #[error("Failed to create output root {}: {source}", path.display())]
    OutputRootCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output root is not a directory: {}", .0.display())]
    OutputRootNotDirectory(PathBuf),

    #[error("Output root is not writable {}: {source}", path.display())]
    OutputRootReadOnly {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to traverse input root: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Sample grid is empty")]
    EmptyGrid,

    #[error("Sample grid {dimensions} expects {expected} samples, got {actual}")]
    DimensionMismatch {
        dimensions: Dimensions,
        expected: usize,
        actual: usize,
    },
}

/// Pipeline stage at which a single file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Normalize,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Decode => write!(f, "decode"),
            Stage::Normalize => write!(f, "normalize"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// A per-file failure; recorded in the report, never fatal to the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub stage: Stage,
    pub reason: String,
}

impl FileFailure {
    pub fn new(path: PathBuf, stage: Stage, error: &anyhow::Error) -> Self {
        Self {
            path,
            stage,
            reason: format!("{error:#}"),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} failed): {}", self.path.display(), self.stage, self.reason)
    }
}
