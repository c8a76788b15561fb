//! Calendar month scoping for the dashboard.

use std::fmt::Display;

use time::{Date, Month};

use crate::transaction::Transaction;

/// A calendar month in a specific year, e.g. January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    /// Create a year-month.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The month before this one. January rolls back to December of the previous year.
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        }
    }

    /// Whether `date` falls in this month. Both the month and the year must match.
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// The transactions dated in `month`, in their original order.
///
/// Transactions whose date cannot be parsed are never in any month.
pub fn transactions_in_month(transactions: &[Transaction], month: YearMonth) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction
                .parsed_date()
                .is_some_and(|date| month.contains(date))
        })
        .cloned()
        .collect()
}

/// Transactions split into the month of some day and the month before it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSplit {
    /// The month containing the reference day.
    pub current_month: YearMonth,
    /// Transactions dated in [MonthSplit::current_month].
    pub current: Vec<Transaction>,
    /// Transactions dated in the month before [MonthSplit::current_month].
    pub previous: Vec<Transaction>,
}

/// Split `transactions` into those dated in the month of `today` and those
/// dated in the month before it. Everything else is left out.
pub fn split_by_month(transactions: &[Transaction], today: Date) -> MonthSplit {
    let current_month = YearMonth::of(today);

    MonthSplit {
        current_month,
        current: transactions_in_month(transactions, current_month),
        previous: transactions_in_month(transactions, current_month.previous()),
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        dashboard::month::{YearMonth, split_by_month, transactions_in_month},
        transaction::Transaction,
    };

    #[test]
    fn previous_of_january_is_december_last_year() {
        let january = YearMonth::new(2024, Month::January);

        assert_eq!(january.previous(), YearMonth::new(2023, Month::December));
    }

    #[test]
    fn previous_of_march_is_february() {
        let march = YearMonth::new(2024, Month::March);

        assert_eq!(march.previous(), YearMonth::new(2024, Month::February));
    }

    #[test]
    fn month_filter_matches_month_and_year() {
        let cafe = Transaction::new("Cafe", 5.0, "Food", "2024-01-05");
        let transactions = vec![cafe.clone()];

        assert_eq!(
            transactions_in_month(&transactions, YearMonth::new(2024, Month::January)),
            vec![cafe]
        );
        assert!(
            transactions_in_month(&transactions, YearMonth::new(2024, Month::February)).is_empty()
        );
        assert!(
            transactions_in_month(&transactions, YearMonth::new(2023, Month::January)).is_empty()
        );
    }

    #[test]
    fn unparseable_dates_are_in_no_month() {
        let transactions = vec![Transaction::new("Mystery", 1.0, "", "soon")];

        assert!(
            transactions_in_month(&transactions, YearMonth::new(2024, Month::January)).is_empty()
        );
    }

    #[test]
    fn split_handles_year_rollover() {
        let new_year = Transaction::new("Cafe", 5.0, "Food", "2024-01-05");
        let december = Transaction::new("Gifts", 50.0, "Shopping", "Dec 20, 2023");
        let older = Transaction::new("Airline", 345.0, "Travel", "2023-11-02");
        let transactions = vec![new_year.clone(), december.clone(), older];

        let split = split_by_month(&transactions, date!(2024 - 01 - 15));

        assert_eq!(split.current_month, YearMonth::new(2024, Month::January));
        assert_eq!(split.current, vec![new_year]);
        assert_eq!(split.previous, vec![december]);
    }

    #[test]
    fn displays_month_name_and_year() {
        assert_eq!(YearMonth::new(2024, Month::January).to_string(), "January 2024");
    }
}
