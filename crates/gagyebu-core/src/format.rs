//! Pure presentation helpers shared by every report view.
//!
//! Nothing here reads the clock or process locale; callers pass the style and dates in.

use chrono::{Datelike, NaiveDate};
use gagyebu_domain::{Entry, EntryKind, YearMonth};

use crate::CoreError;

const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Grouping separator and currency suffix applied to whole-unit amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountStyle {
    pub grouping_separator: char,
    pub suffix: String,
}

impl Default for AmountStyle {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
            suffix: "원".into(),
        }
    }
}

impl AmountStyle {
    pub fn new(grouping_separator: char, suffix: impl Into<String>) -> Self {
        Self {
            grouping_separator,
            suffix: suffix.into(),
        }
    }
}

/// Renders `1234567` as `1,234,567원` under the default style.
pub fn format_amount(amount: u64, style: &AmountStyle) -> String {
    let mut body = group_digits(&amount.to_string(), style.grouping_separator);
    body.push_str(&style.suffix);
    body
}

pub fn format_won(amount: u64) -> String {
    format_amount(amount, &AmountStyle::default())
}

/// Prefixes the amount with `+` for income and `-` for expense.
pub fn format_signed(kind: EntryKind, amount: u64, style: &AmountStyle) -> String {
    let sign = match kind {
        EntryKind::Income => '+',
        EntryKind::Expense => '-',
    };
    format!("{sign}{}", format_amount(amount, style))
}

/// Balance with an explicit sign: `+` for zero or surplus, `-` for deficit.
pub fn format_balance(balance: i64, style: &AmountStyle) -> String {
    let sign = if balance >= 0 { '+' } else { '-' };
    format!("{sign}{}", format_amount(balance.unsigned_abs(), style))
}

/// `2025-01` → `2025년 1월`.
pub fn year_month_label(year_month: YearMonth) -> String {
    format!("{}년 {}월", year_month.year(), year_month.month())
}

/// History group heading such as `1월 5일 (일)`.
pub fn date_heading(date: NaiveDate) -> String {
    let weekday = WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize];
    format!("{}월 {}일 ({})", date.month(), date.day(), weekday)
}

/// Single-line description used when confirming edits and deletions.
pub fn entry_line(entry: &Entry, style: &AmountStyle) -> String {
    format!(
        "{}  {}  {}",
        entry.date.format("%Y-%m-%d"),
        entry.category,
        format_signed(entry.kind, entry.amount, style)
    )
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "`{value}` is not a valid date (expected YYYY-MM-DD)"
        ))
    })
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
