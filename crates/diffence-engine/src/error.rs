//! Error taxonomy for the formatting pipeline.
//!
//! Only [`ScanError`] is recoverable: [`crate::format_markdown`] catches it and
//! returns the document unchanged. Everything else reaches the caller.

use thiserror::Error;

/// Malformed input or call into the core. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document is {len} bytes, larger than the {max} byte limit")]
    DocumentTooLarge { len: usize, max: usize },

    #[error("fence indent of {indent} exceeds the limit of {max}")]
    FenceIndentTooLarge { indent: usize, max: usize },
}

/// The scanner gave up before reaching the end of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scan stopped after {steps} steps (limit {limit})")]
    LimitExceeded { steps: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),

    /// A computed span does not fit the document. Indicates a bug, not bad input.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl FormatError {
    /// Whether the error is a scan failure that the top level turns into a passthrough.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FormatError::Scan(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = FormatError::from(ValidationError::FenceIndentTooLarge {
            indent: 5000,
            max: 1000,
        });
        assert_eq!(
            err.to_string(),
            "fence indent of 5000 exceeds the limit of 1000"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn scan_errors_are_recoverable() {
        let err = FormatError::from(ScanError::LimitExceeded {
            steps: 11,
            limit: 10,
        });
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "scan failed: scan stopped after 11 steps (limit 10)");
    }
}
