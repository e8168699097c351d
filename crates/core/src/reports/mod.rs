//! Report and backup artifact generation.
//!
//! Pure transforms: callers pre-fetch the data (and the generation
//! timestamp) and pass it in, so both renderers are side-effect-free.
//!
//! - `pdf` - Branded transaction report rendering
//! - `backup` - Full-export backup document assembly

pub mod backup;
pub mod error;
pub mod pdf;
pub mod types;

#[cfg(test)]
mod tests;

pub use backup::BackupService;
pub use error::ReportError;
pub use pdf::PdfRenderer;
pub use types::{
    BackupDocument, BackupSummary, BackupTransaction, BackupUser, ReportFilter, ReportSummary,
    ReportTransaction, TransactionReport,
};
