//! Report data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filters a transaction report was assembled under.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// Inclusive lower date bound.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to_date: Option<NaiveDate>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact payment method match.
    pub payment_method: Option<String>,
}

impl ReportFilter {
    /// Returns true when no filter field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from_date.is_none()
            && self.to_date.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
    }
}

/// Summary block of a transaction report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of transactions in the report.
    pub count: u64,
    /// Sum of all transaction amounts.
    pub total_amount: Decimal,
}

/// A transaction row as it appears in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTransaction {
    /// Transaction date.
    pub date: NaiveDate,
    /// Free-text category.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Payment method (`CASH`, `ONLINE`, `OTHER`).
    pub payment_method: String,
    /// Counterparty name.
    pub party_name: String,
    /// Transaction amount.
    pub amount: Decimal,
}

/// A fully assembled transaction report ready for rendering.
#[derive(Debug, Clone)]
pub struct TransactionReport {
    /// The filters the rows were fetched under.
    pub filter: ReportFilter,
    /// Count and total over the rows.
    pub summary: ReportSummary,
    /// The rows, ordered by date descending.
    pub transactions: Vec<ReportTransaction>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl TransactionReport {
    /// Assembles a report, computing the summary from the rows.
    #[must_use]
    pub fn new(
        filter: ReportFilter,
        transactions: Vec<ReportTransaction>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let total_amount: Decimal = transactions.iter().map(|t| t.amount).sum();
        let summary = ReportSummary {
            count: transactions.len() as u64,
            total_amount,
        };
        Self {
            filter,
            summary,
            transactions,
            generated_at,
        }
    }
}

/// A user row in a backup document. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupUser {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role (`ADMIN` or `VIEWER`).
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account may download reports.
    pub can_download: bool,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// A transaction row in a backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupTransaction {
    /// Transaction ID.
    pub id: Uuid,
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction amount.
    pub amount: Decimal,
    /// Free-text category.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Payment method.
    pub payment_method: String,
    /// Counterparty name.
    pub party_name: String,
    /// Optional invoice image reference.
    pub invoice_image: Option<String>,
    /// Owning user.
    pub user_id: Uuid,
    /// Whether an admin signed the transaction off.
    pub requires_auth: bool,
    /// The admin who signed off.
    pub authorized_by: Option<Uuid>,
    /// When the sign-off happened.
    pub authorized_at: Option<DateTime<Utc>>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Row update time.
    pub updated_at: DateTime<Utc>,
}

/// Aggregate summary of a backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    /// Number of users exported.
    pub total_users: u64,
    /// Number of transactions exported.
    pub total_transactions: u64,
    /// Sum of all transaction amounts.
    pub total_amount: Decimal,
}

/// A full backup export: users minus credentials, all transactions,
/// and an aggregate summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// When the backup was generated.
    pub generated_at: DateTime<Utc>,
    /// Aggregate summary.
    pub summary: BackupSummary,
    /// Exported users.
    pub users: Vec<BackupUser>,
    /// Exported transactions.
    pub transactions: Vec<BackupTransaction>,
}
