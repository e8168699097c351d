//! Dashboard aggregation windows and stats types.
//!
//! The period boundaries are computed here from a caller-supplied
//! `today` so the repository layer only has to fetch and sum.

pub mod period;
pub mod types;

pub use period::PeriodWindows;
pub use types::DashboardStats;
