//! Stat cards and chart series for the dashboard and the reports view.

use std::cmp::Reverse;

use time::Date;

use crate::{
    dashboard::{
        aggregation::{
            Group, average_transaction, category_shares, group_by_category, group_by_dated_day,
            group_by_week_of_month, percent_change, top_category, total_spending,
        },
        month::{YearMonth, split_by_month},
    },
    receipt::Receipt,
    transaction::Transaction,
};

/// How many transactions the dashboard lists as recent activity.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// The figures shown on the dashboard for the month containing a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// The month being summarised.
    pub month: YearMonth,
    /// Total spending this month.
    pub total_spending: f64,
    /// Percent change in total spending from last month.
    pub spending_change: f64,
    /// The number of receipts for transactions dated this month.
    pub receipt_count: usize,
    /// This month's receipt count minus last month's.
    pub receipt_count_change: i64,
    /// Mean transaction amount this month.
    pub average_transaction: f64,
    /// Percent change in the mean transaction amount from last month.
    pub average_change: f64,
    /// This month's category with the highest spending.
    pub top_category: Option<Group>,
    /// This month's spending per category.
    pub spending_by_category: Vec<Group>,
    /// This month's spending per week, "Week 1" to "Week 5".
    pub spending_by_week: Vec<Group>,
    /// The most recent transactions of any month, newest first.
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    /// Summarise the month containing `today`, comparing it with the month before.
    pub fn compute(transactions: &[Transaction], receipts: &[Receipt], today: Date) -> Self {
        let split = split_by_month(transactions, today);

        let receipt_count = count_receipts_for(receipts, &split.current);
        let previous_receipt_count = count_receipts_for(receipts, &split.previous);

        let total = total_spending(&split.current);
        let average = average_transaction(&split.current);

        Self {
            month: split.current_month,
            total_spending: total,
            spending_change: percent_change(total, total_spending(&split.previous)),
            receipt_count,
            receipt_count_change: receipt_count as i64 - previous_receipt_count as i64,
            average_transaction: average,
            average_change: percent_change(average, average_transaction(&split.previous)),
            top_category: top_category(&split.current),
            spending_by_category: group_by_category(&split.current),
            spending_by_week: group_by_week_of_month(&split.current),
            recent_transactions: most_recent(transactions, RECENT_TRANSACTION_COUNT),
        }
    }
}

/// Which transactions a [Report] covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// The earliest date to include.
    pub from: Option<Date>,
    /// The latest date to include.
    pub to: Option<Date>,
    /// The exact category name to include.
    pub category: Option<String>,
}

impl ReportFilter {
    /// Whether `transaction` is covered by the filter.
    ///
    /// A transaction with an unparseable date fails any date bound.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let in_category = self
            .category
            .as_deref()
            .is_none_or(|category| transaction.category == category);

        if !in_category {
            return false;
        }

        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        transaction.parsed_date().is_some_and(|date| {
            self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
        })
    }
}

/// Spending figures over an arbitrary date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The covered transactions, oldest first. Undated transactions come last.
    pub transactions: Vec<Transaction>,
    /// Total spending of the covered transactions.
    pub total_spending: f64,
    /// The number of receipts for the covered transactions.
    pub receipt_count: usize,
    /// Mean amount of the covered transactions.
    pub average_transaction: f64,
    /// The category with the highest spending.
    pub top_category: Option<Group>,
    /// Each category's percentage of total spending.
    pub category_shares: Vec<Group>,
    /// Spending per day, oldest first, labelled like "Jan 05, 2024".
    pub daily_spending: Vec<Group>,
}

impl Report {
    /// Build the report for the transactions covered by `filter`.
    pub fn compute(transactions: &[Transaction], receipts: &[Receipt], filter: &ReportFilter) -> Self {
        let mut covered: Vec<Transaction> = transactions
            .iter()
            .filter(|transaction| filter.matches(transaction))
            .cloned()
            .collect();
        covered.sort_by_key(|transaction| {
            let date = transaction.parsed_date();
            (date.is_none(), date)
        });

        Self {
            total_spending: total_spending(&covered),
            receipt_count: count_receipts_for(receipts, &covered),
            average_transaction: average_transaction(&covered),
            top_category: top_category(&covered),
            category_shares: category_shares(&covered),
            daily_spending: group_by_dated_day(&covered),
            transactions: covered,
        }
    }
}

fn count_receipts_for(receipts: &[Receipt], transactions: &[Transaction]) -> usize {
    receipts
        .iter()
        .filter(|receipt| {
            transactions
                .iter()
                .any(|transaction| transaction.id == receipt.transaction_id)
        })
        .count()
}

/// The `count` newest transactions by date. Undated transactions sort last.
fn most_recent(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|transaction| Reverse(transaction.parsed_date()));
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        dashboard::{DashboardSummary, Report, ReportFilter, YearMonth},
        receipt::Receipt,
        transaction::Transaction,
    };

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::new("Starbucks", 5.75, "Dining", "Oct 26, 2023"),
            Transaction::new("Amazon", 42.99, "Shopping", "Oct 25, 2023"),
            Transaction::new("Trader Joe's", 88.14, "Groceries", "Oct 24, 2023"),
            Transaction::new("United Airlines", 345.0, "Travel", "Oct 22, 2023"),
            Transaction::new("PG&E", 112.3, "Utilities", "Oct 20, 2023"),
            Transaction::new("Cafe", 10.0, "Dining", "2023-09-14"),
            Transaction::new("Bakery", 30.0, "Dining", "2023-09-02"),
            Transaction::new("Mystery", 1.0, "", "someday"),
        ]
    }

    fn receipts_for(transactions: &[Transaction]) -> Vec<Receipt> {
        transactions
            .iter()
            .map(|transaction| Receipt::new(transaction.id.clone(), "file.jpg"))
            .collect()
    }

    #[test]
    fn dashboard_compares_with_previous_month() {
        let transactions = transactions();
        let receipts = receipts_for(&transactions[..6]);

        let summary = DashboardSummary::compute(&transactions, &receipts, date!(2023 - 10 - 27));

        assert_eq!(summary.month, YearMonth::new(2023, Month::October));
        assert!((summary.total_spending - 594.18).abs() < 1e-9);
        assert!((summary.spending_change - (594.18 - 40.0) / 40.0 * 100.0).abs() < 1e-9);
        assert_eq!(summary.receipt_count, 5);
        assert_eq!(summary.receipt_count_change, 4);
        assert_eq!(summary.top_category, Some(("Travel".to_owned(), 345.0)));
        assert_eq!(summary.spending_by_category.len(), 5);
    }

    #[test]
    fn dashboard_lists_newest_transactions_first() {
        let summary = DashboardSummary::compute(&transactions(), &[], date!(2023 - 10 - 27));

        let vendors: Vec<&str> = summary
            .recent_transactions
            .iter()
            .map(|transaction| transaction.vendor.as_str())
            .collect();
        assert_eq!(
            vendors,
            ["Starbucks", "Amazon", "Trader Joe's", "United Airlines", "PG&E"]
        );
    }

    #[test]
    fn dashboard_of_empty_month_is_zero() {
        let summary = DashboardSummary::compute(&transactions(), &[], date!(2024 - 06 - 01));

        assert_eq!(summary.total_spending, 0.0);
        assert_eq!(summary.spending_change, 0.0);
        assert_eq!(summary.average_transaction, 0.0);
        assert_eq!(summary.top_category, None);
        assert!(summary.spending_by_week.is_empty());
    }

    #[test]
    fn report_covers_inclusive_range_oldest_first() {
        let filter = ReportFilter {
            from: Some(date!(2023 - 09 - 14)),
            to: Some(date!(2023 - 10 - 22)),
            category: None,
        };

        let report = Report::compute(&transactions(), &[], &filter);

        let vendors: Vec<&str> = report
            .transactions
            .iter()
            .map(|transaction| transaction.vendor.as_str())
            .collect();
        assert_eq!(vendors, ["Cafe", "PG&E", "United Airlines"]);
        assert_eq!(report.total_spending, 10.0 + 112.3 + 345.0);
        assert_eq!(report.daily_spending[0], ("Sep 14, 2023".to_owned(), 10.0));
    }

    #[test]
    fn report_filters_by_category() {
        let transactions = transactions();
        let receipts = receipts_for(&transactions);
        let filter = ReportFilter {
            category: Some("Dining".to_owned()),
            ..Default::default()
        };

        let report = Report::compute(&transactions, &receipts, &filter);

        assert_eq!(report.transactions.len(), 3);
        assert_eq!(report.receipt_count, 3);
        assert_eq!(report.category_shares, vec![("Dining".to_owned(), 100.0)]);
    }

    #[test]
    fn unfiltered_report_puts_undated_last() {
        let report = Report::compute(&transactions(), &[], &ReportFilter::default());

        assert_eq!(report.transactions.len(), 8);
        assert_eq!(report.transactions[7].vendor, "Mystery");
    }

    #[test]
    fn report_keeps_same_day_of_different_years_apart() {
        let transactions = vec![
            Transaction::new("Cafe", 1.0, "Dining", "2023-01-05"),
            Transaction::new("Cafe", 4.0, "Dining", "2024-01-05"),
            Transaction::new("Bakery", 2.0, "Dining", "2023-06-01"),
        ];
        let filter = ReportFilter {
            from: Some(date!(2023 - 01 - 01)),
            to: Some(date!(2024 - 12 - 31)),
            category: None,
        };

        let report = Report::compute(&transactions, &[], &filter);

        assert_eq!(
            report.daily_spending,
            vec![
                ("Jan 05, 2023".to_owned(), 1.0),
                ("Jun 01, 2023".to_owned(), 2.0),
                ("Jan 05, 2024".to_owned(), 4.0),
            ]
        );
    }
}
