//! Derived report shapes produced by the aggregation services. Never persisted.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{common::YearMonth, entry::Entry, entry::EntryKind};

/// Category name to summed amount, in first-seen order.
pub type CategorySums = IndexMap<String, u64>;

/// Totals, balance, and per-category sums for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year_month: YearMonth,
    pub income_total: u64,
    pub expense_total: u64,
    pub balance: i64,
    pub income_by_category: CategorySums,
    pub expense_by_category: CategorySums,
}

impl MonthlySummary {
    pub fn empty(year_month: YearMonth) -> Self {
        Self {
            year_month,
            income_total: 0,
            expense_total: 0,
            balance: 0,
            income_by_category: CategorySums::new(),
            expense_by_category: CategorySums::new(),
        }
    }

    pub fn total(&self, kind: EntryKind) -> u64 {
        match kind {
            EntryKind::Income => self.income_total,
            EntryKind::Expense => self.expense_total,
        }
    }

    pub fn by_category(&self, kind: EntryKind) -> &CategorySums {
        match kind {
            EntryKind::Income => &self.income_by_category,
            EntryKind::Expense => &self.expense_by_category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }
}

/// Income and expense totals for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: u64,
    pub expense: u64,
}

/// One category's share of a chart. `value` is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    pub color: String,
}

/// A slice annotated with its rounded percentage of the chart total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    pub slice: Slice,
    pub percent: u32,
}

/// Entries sharing one calendar date, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryGroup {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

impl HistoryGroup {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
