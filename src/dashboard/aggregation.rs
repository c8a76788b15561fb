//! Transaction data aggregation for stat cards and charts.
//!
//! Every function here is pure and total: empty input gives zero or an empty
//! list, never an error. Groupings keep the order in which each key was first
//! seen so that chart series line up with the transactions that produced them.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::Transaction;

/// Chart label for a day, e.g. "Jan 05".
const DAY_LABEL_FORMAT: &[BorrowedFormatItem] = format_description!("[month repr:short] [day]");

/// Chart label for a day in a range that may span years, e.g. "Jan 05, 2024".
const DATED_DAY_LABEL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day], [year]");

/// A labelled total, e.g. ("Groceries", 88.14).
pub type Group = (String, f64);

/// The sum of the amounts of `transactions`, zero if there are none.
pub fn total_spending(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|transaction| transaction.amount).sum()
}

/// The mean amount of `transactions`, zero if there are none.
pub fn average_transaction(transactions: &[Transaction]) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }

    total_spending(transactions) / transactions.len() as f64
}

/// The change from `previous` to `current` as a percentage of `previous`.
///
/// Defined as zero when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}

/// Sum the amounts of `transactions` per key, in first-seen key order.
///
/// # Arguments
/// * `transactions` - The transactions to group
/// * `key` - Gives the group of a transaction, or `None` to leave it out
pub fn group_by<F>(transactions: &[Transaction], mut key: F) -> Vec<Group>
where
    F: FnMut(&Transaction) -> Option<String>,
{
    let mut groups: Vec<Group> = Vec::new();

    for transaction in transactions {
        let Some(label) = key(transaction) else {
            continue;
        };

        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, total)) => *total += transaction.amount,
            None => groups.push((label, transaction.amount)),
        }
    }

    groups
}

/// Total spending per category name.
///
/// Uncategorized transactions are grouped under the empty string.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<Group> {
    group_by(transactions, |transaction| Some(transaction.category.clone()))
}

/// Total spending per day, labelled like "Jan 05".
///
/// Transactions with a date that cannot be parsed are grouped under the raw
/// date string.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<Group> {
    group_by_day_label(transactions, DAY_LABEL_FORMAT)
}

/// Total spending per day, labelled like "Jan 05, 2024".
///
/// Use this over ranges longer than a month so that the same day in different
/// years stays apart. Unparseable dates are grouped as in [group_by_date].
pub fn group_by_dated_day(transactions: &[Transaction]) -> Vec<Group> {
    group_by_day_label(transactions, DATED_DAY_LABEL_FORMAT)
}

fn group_by_day_label(transactions: &[Transaction], format: &[BorrowedFormatItem]) -> Vec<Group> {
    group_by(transactions, |transaction| {
        let label = transaction
            .parsed_date()
            .and_then(|date| date.format(format).ok())
            .unwrap_or_else(|| transaction.date.clone());

        Some(label)
    })
}

/// Total spending per week of the month, labelled "Week 1" to "Week 5".
///
/// Days 1-7 are week 1, days 8-14 are week 2 and so on. Transactions with a
/// date that cannot be parsed are left out. The result is in week order.
pub fn group_by_week_of_month(transactions: &[Transaction]) -> Vec<Group> {
    let mut weeks = group_by(transactions, |transaction| {
        transaction
            .parsed_date()
            .map(|date| format!("Week {}", week_of_month(date)))
    });

    weeks.sort_by(|(a, _), (b, _)| a.cmp(b));
    weeks
}

/// The week of the month `date` falls in, from 1 to 5.
pub fn week_of_month(date: Date) -> u8 {
    (date.day() - 1) / 7 + 1
}

/// The category with the highest total spending.
///
/// Ties go to the category seen first. Returns `None` for no transactions.
pub fn top_category(transactions: &[Transaction]) -> Option<Group> {
    group_by_category(transactions)
        .into_iter()
        .fold(None, |top: Option<Group>, group| match top {
            Some(top) if top.1 >= group.1 => Some(top),
            _ => Some(group),
        })
}

/// Each category's share of total spending as a percentage.
///
/// Every share is zero when the total is zero.
pub fn category_shares(transactions: &[Transaction]) -> Vec<Group> {
    let total = total_spending(transactions);

    group_by_category(transactions)
        .into_iter()
        .map(|(category, amount)| {
            let share = if total == 0.0 {
                0.0
            } else {
                amount / total * 100.0
            };

            (category, share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::aggregation::{
            average_transaction, category_shares, group_by_category, group_by_date,
            group_by_week_of_month, percent_change, top_category, total_spending, week_of_month,
        },
        transaction::Transaction,
    };

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new("Starbucks", 5.75, "Dining", "Oct 26, 2023"),
            Transaction::new("Amazon", 42.99, "Shopping", "Oct 25, 2023"),
            Transaction::new("Trader Joe's", 88.14, "Groceries", "Oct 24, 2023"),
            Transaction::new("Cafe", 4.25, "Dining", "2023-10-03"),
            Transaction::new("Mystery", 10.0, "", "someday"),
        ]
    }

    #[test]
    fn total_of_empty_is_zero() {
        assert_eq!(total_spending(&[]), 0.0);
    }

    #[test]
    fn total_sums_amounts() {
        let total = total_spending(&sample_transactions());

        assert!((total - 151.13).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_transaction(&[]), 0.0);
    }

    #[test]
    fn average_divides_total_by_count() {
        let transactions = sample_transactions();

        let average = average_transaction(&transactions);

        assert_eq!(average, total_spending(&transactions) / 5.0);
    }

    #[test]
    fn percent_change_from_zero_is_zero() {
        assert_eq!(percent_change(123.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn percent_change_is_relative_to_previous() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let groups = group_by_category(&sample_transactions());

        assert_eq!(
            groups,
            vec![
                ("Dining".to_owned(), 10.0),
                ("Shopping".to_owned(), 42.99),
                ("Groceries".to_owned(), 88.14),
                ("".to_owned(), 10.0),
            ]
        );
    }

    #[test]
    fn groups_by_date_label() {
        let groups = group_by_date(&sample_transactions());

        let labels: Vec<&str> = groups.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["Oct 26", "Oct 25", "Oct 24", "Oct 03", "someday"]);
    }

    #[test]
    fn weeks_of_month() {
        assert_eq!(week_of_month(date!(2023 - 10 - 01)), 1);
        assert_eq!(week_of_month(date!(2023 - 10 - 07)), 1);
        assert_eq!(week_of_month(date!(2023 - 10 - 08)), 2);
        assert_eq!(week_of_month(date!(2023 - 10 - 31)), 5);
    }

    #[test]
    fn groups_by_week_in_week_order() {
        let groups = group_by_week_of_month(&sample_transactions());

        assert_eq!(
            groups,
            vec![
                ("Week 1".to_owned(), 4.25),
                ("Week 4".to_owned(), 5.75 + 42.99 + 88.14),
            ]
        );
    }

    #[test]
    fn top_category_has_highest_total() {
        assert_eq!(
            top_category(&sample_transactions()),
            Some(("Groceries".to_owned(), 88.14))
        );
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn category_shares_sum_to_one_hundred() {
        let shares = category_shares(&sample_transactions());

        let sum: f64 = shares.iter().map(|(_, share)| share).sum();
        assert!((sum - 100.0).abs() < 1e-9, "got {sum}");
    }

    #[test]
    fn category_shares_of_zero_total_are_zero() {
        let transactions = vec![Transaction::new("Free", 0.0, "Gifts", "2024-01-01")];

        assert_eq!(category_shares(&transactions), vec![("Gifts".to_owned(), 0.0)]);
    }
}
