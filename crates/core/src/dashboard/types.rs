//! Dashboard stat types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role-scoped dashboard aggregates for a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Count of today's transactions.
    pub total_today: u64,
    /// Sum of today's transaction amounts.
    pub total_amount_today: Decimal,
    /// Sum over the last seven days, inclusive of today.
    pub total_amount_week: Decimal,
    /// Sum over the calendar month to date.
    pub total_amount_month: Decimal,
    /// All-time transaction count.
    pub total_transactions: u64,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = DashboardStats {
            total_today: 3,
            total_amount_today: dec!(120.50),
            total_amount_week: dec!(840.00),
            total_amount_month: dec!(2100.75),
            total_transactions: 42,
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalToday"], 3);
        assert_eq!(value["totalAmountToday"], "120.50");
        assert_eq!(value["totalAmountWeek"], "840.00");
        assert_eq!(value["totalAmountMonth"], "2100.75");
        assert_eq!(value["totalTransactions"], 42);
    }
}
