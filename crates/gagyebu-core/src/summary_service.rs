//! Aggregation helpers for monthly and daily summaries.

use chrono::NaiveDate;
use gagyebu_domain::{CategorySums, DailyTotals, Entry, EntryKind, MonthlySummary, YearMonth};

/// Reduces already-filtered entry lists into report totals.
///
/// See also: [`gagyebu_domain::MonthlySummary`] for the returned data model.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes the entries of one month in a single pass.
    ///
    /// Month membership is the caller's responsibility; every supplied entry is counted.
    /// Categories outside the registry are kept and category sums are created lazily, so
    /// a category with no entries never appears.
    pub fn monthly(year_month: YearMonth, entries: &[Entry]) -> MonthlySummary {
        let mut summary = MonthlySummary::empty(year_month);

        for entry in entries {
            let (total, by_category) = match entry.kind {
                EntryKind::Income => (&mut summary.income_total, &mut summary.income_by_category),
                EntryKind::Expense => {
                    (&mut summary.expense_total, &mut summary.expense_by_category)
                }
            };
            *total = total.saturating_add(entry.amount);
            let sum = by_category.entry(entry.category.clone()).or_insert(0);
            *sum = sum.saturating_add(entry.amount);
        }

        summary.balance = balance(summary.income_total, summary.expense_total);
        tracing::debug!(
            month = %year_month,
            entries = entries.len(),
            balance = summary.balance,
            "monthly summary computed"
        );
        summary
    }

    /// Income and expense totals for one day's entries.
    pub fn daily(date: NaiveDate, entries: &[Entry]) -> DailyTotals {
        entries.iter().fold(
            DailyTotals {
                date,
                income: 0,
                expense: 0,
            },
            |mut totals, entry| {
                match entry.kind {
                    EntryKind::Income => totals.income = totals.income.saturating_add(entry.amount),
                    EntryKind::Expense => {
                        totals.expense = totals.expense.saturating_add(entry.amount)
                    }
                }
                totals
            },
        )
    }

    /// Breakdown rows ordered by amount, largest first; equal amounts keep mapping order.
    pub fn breakdown(sums: &CategorySums) -> Vec<(String, u64)> {
        let mut rows: Vec<(String, u64)> = sums
            .iter()
            .map(|(category, amount)| (category.clone(), *amount))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

/// Exact while both totals fit in `i64`; clamps beyond that instead of wrapping.
fn balance(income: u64, expense: u64) -> i64 {
    let difference = i128::from(income) - i128::from(expense);
    i64::try_from(difference).unwrap_or(if difference < 0 { i64::MIN } else { i64::MAX })
}
