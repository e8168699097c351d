//! Backup document assembly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{BackupDocument, BackupSummary, BackupTransaction, BackupUser};

/// Service for assembling backup exports.
pub struct BackupService;

impl BackupService {
    /// Assembles a backup document from pre-fetched rows.
    ///
    /// The summary is computed over the supplied rows; nothing is
    /// fetched here.
    #[must_use]
    pub fn assemble(
        users: Vec<BackupUser>,
        transactions: Vec<BackupTransaction>,
        generated_at: DateTime<Utc>,
    ) -> BackupDocument {
        let total_amount: Decimal = transactions.iter().map(|t| t.amount).sum();

        BackupDocument {
            generated_at,
            summary: BackupSummary {
                total_users: users.len() as u64,
                total_transactions: transactions.len() as u64,
                total_amount,
            },
            users,
            transactions,
        }
    }
}
