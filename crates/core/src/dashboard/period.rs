//! Date windows for dashboard aggregates.

use chrono::{Datelike, Days, NaiveDate};

/// Inclusive lower bounds for the dashboard periods, derived from a
/// single reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    /// The reference date itself.
    pub today: NaiveDate,
    /// Seven-day window start, inclusive of `today`.
    pub week_start: NaiveDate,
    /// First day of the reference date's calendar month.
    pub month_start: NaiveDate,
}

impl PeriodWindows {
    /// Computes the period windows for a reference date.
    #[must_use]
    pub fn for_date(today: NaiveDate) -> Self {
        let week_start = today
            .checked_sub_days(Days::new(6))
            .unwrap_or(NaiveDate::MIN);
        // Day 1 exists in every month.
        let month_start = today.with_day(1).unwrap_or(today);
        Self {
            today,
            week_start,
            month_start,
        }
    }
}
