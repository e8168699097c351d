//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The PDF backend failed to produce a document.
    #[error("failed to render PDF: {0}")]
    RenderFailed(String),
}
