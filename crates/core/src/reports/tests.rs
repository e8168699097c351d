//! Property and unit tests for the reports module.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::backup::BackupService;
use super::pdf::PdfRenderer;
use super::types::{
    BackupTransaction, BackupUser, ReportFilter, ReportTransaction, TransactionReport,
};

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0).unwrap()
}

fn report_row(index: usize, amount: Decimal) -> ReportTransaction {
    ReportTransaction {
        date: NaiveDate::from_ymd_opt(2026, 3, (index % 28 + 1) as u32).unwrap(),
        category: format!("Category {index}"),
        description: Some(format!("Row {index}")),
        payment_method: "CASH".to_string(),
        party_name: format!("Party {index}"),
        amount,
    }
}

fn backup_user(index: usize) -> BackupUser {
    BackupUser {
        id: Uuid::new_v4(),
        email: format!("user{index}@example.com"),
        name: format!("User {index}"),
        role: if index == 0 { "ADMIN" } else { "VIEWER" }.to_string(),
        is_active: true,
        can_download: index % 2 == 0,
        created_at: fixed_timestamp(),
    }
}

fn backup_transaction(index: usize, amount: Decimal) -> BackupTransaction {
    BackupTransaction {
        id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2026, 3, (index % 28 + 1) as u32).unwrap(),
        amount,
        category: format!("Category {index}"),
        description: None,
        payment_method: "ONLINE".to_string(),
        party_name: format!("Party {index}"),
        invoice_image: None,
        user_id: Uuid::new_v4(),
        requires_auth: false,
        authorized_by: None,
        authorized_at: None,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

proptest! {
    /// The report summary always reflects the rows it was built from:
    /// count equals the row count and the total is the exact decimal sum.
    #[test]
    fn test_report_summary_matches_rows(num_rows in 0usize..60) {
        let rows: Vec<ReportTransaction> = (0..num_rows)
            .map(|i| report_row(i, Decimal::new(i as i64 * 12_345 + 99, 2)))
            .collect();
        let expected_total: Decimal = rows.iter().map(|r| r.amount).sum();

        let report = TransactionReport::new(ReportFilter::default(), rows, fixed_timestamp());

        prop_assert_eq!(report.summary.count, num_rows as u64);
        prop_assert_eq!(report.summary.total_amount, expected_total);
        prop_assert_eq!(report.transactions.len(), num_rows);
    }

    /// Backup assembly counts both collections and totals the
    /// transaction amounts exactly.
    #[test]
    fn test_backup_summary_counts_and_total(
        num_users in 0usize..10,
        num_transactions in 0usize..30,
    ) {
        let users: Vec<BackupUser> = (0..num_users).map(backup_user).collect();
        let transactions: Vec<BackupTransaction> = (0..num_transactions)
            .map(|i| backup_transaction(i, Decimal::new(i as i64 * 777 + 25, 2)))
            .collect();
        let expected_total: Decimal = transactions.iter().map(|t| t.amount).sum();

        let document = BackupService::assemble(users, transactions, fixed_timestamp());

        prop_assert_eq!(document.summary.total_users, num_users as u64);
        prop_assert_eq!(document.summary.total_transactions, num_transactions as u64);
        prop_assert_eq!(document.summary.total_amount, expected_total);
    }

    /// Rendering never fails and always produces a PDF, whatever the
    /// row count (including multi-page reports).
    #[test]
    fn test_pdf_render_is_well_formed(num_rows in 0usize..40) {
        let rows: Vec<ReportTransaction> = (0..num_rows)
            .map(|i| report_row(i, Decimal::new(i as i64 * 100 + 1, 2)))
            .collect();
        let report = TransactionReport::new(ReportFilter::default(), rows, fixed_timestamp());

        let bytes = PdfRenderer::render(&report).unwrap();

        prop_assert!(bytes.starts_with(b"%PDF"));
        prop_assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }
}

#[cfg(test)]
mod unit_tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_report_has_zero_summary() {
        let report =
            TransactionReport::new(ReportFilter::default(), vec![], fixed_timestamp());

        assert_eq!(report.summary.count, 0);
        assert_eq!(report.summary.total_amount, dec!(0));
    }

    #[test]
    fn test_report_summary_sums_decimal_amounts() {
        let rows = vec![
            report_row(0, dec!(100.50)),
            report_row(1, dec!(49.50)),
            report_row(2, dec!(250.00)),
        ];

        let report = TransactionReport::new(ReportFilter::default(), rows, fixed_timestamp());

        assert_eq!(report.summary.count, 3);
        assert_eq!(report.summary.total_amount, dec!(400.00));
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(ReportFilter::default().is_empty());

        let filter = ReportFilter {
            category: Some("Travel".to_string()),
            ..ReportFilter::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_backup_user_wire_shape_excludes_credentials() {
        let document =
            BackupService::assemble(vec![backup_user(0)], vec![], fixed_timestamp());
        let value = serde_json::to_value(&document).unwrap();

        let user = value["users"][0].as_object().unwrap();
        let mut keys: Vec<&str> = user.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "canDownload",
                "createdAt",
                "email",
                "id",
                "isActive",
                "name",
                "role"
            ]
        );
    }

    #[test]
    fn test_backup_transaction_wire_shape_is_camel_case() {
        let document = BackupService::assemble(
            vec![],
            vec![backup_transaction(0, dec!(1250.75))],
            fixed_timestamp(),
        );
        let value = serde_json::to_value(&document).unwrap();

        let row = value["transactions"][0].as_object().unwrap();
        assert!(row.contains_key("paymentMethod"));
        assert!(row.contains_key("partyName"));
        assert!(row.contains_key("requiresAuth"));
        assert!(row.contains_key("authorizedBy"));
        assert!(row.contains_key("authorizedAt"));
        assert!(row.contains_key("invoiceImage"));
        assert!(row.contains_key("userId"));
        // Decimal amounts travel as strings to keep cents exact.
        assert_eq!(row["amount"], json!("1250.75"));
    }

    #[test]
    fn test_pdf_first_page_smoke() {
        let report = TransactionReport::new(
            ReportFilter {
                from_date: NaiveDate::from_ymd_opt(2026, 3, 1),
                to_date: NaiveDate::from_ymd_opt(2026, 3, 31),
                category: Some("Office Supplies".to_string()),
                payment_method: Some("CASH".to_string()),
            },
            vec![report_row(0, dec!(425.00))],
            fixed_timestamp(),
        );

        let bytes = PdfRenderer::render(&report).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_multi_page_is_larger_than_single_page() {
        let one_row = TransactionReport::new(
            ReportFilter::default(),
            vec![report_row(0, dec!(10.00))],
            fixed_timestamp(),
        );
        let many_rows = TransactionReport::new(
            ReportFilter::default(),
            (0..40).map(|i| report_row(i, dec!(10.00))).collect(),
            fixed_timestamp(),
        );

        let small = PdfRenderer::render(&one_row).unwrap();
        let large = PdfRenderer::render(&many_rows).unwrap();

        assert!(large.len() > small.len());
    }
}
