use crate::error::FileFailure;
use std::fmt;

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Files written successfully
    pub converted: usize,
    /// Files that were found but could not be converted
    pub failures: Vec<FileFailure>,
    /// Set when the run stopped early on request
    pub cancelled: bool,
}

impl ConversionReport {
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} converted, {} skipped", self.converted, self.skipped())?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
