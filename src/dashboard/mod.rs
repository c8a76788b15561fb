//! Dashboard module
//!
//! Provides the monthly overview and date range reports built from
//! transactions and receipts.

pub mod aggregation;
mod month;
mod summary;

pub use month::{MonthSplit, YearMonth, split_by_month, transactions_in_month};
pub use summary::{DashboardSummary, RECENT_TRANSACTION_COUNT, Report, ReportFilter};
