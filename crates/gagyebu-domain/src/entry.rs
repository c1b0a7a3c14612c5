//! Domain models for recorded income and expense entries.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque entry identifier. Newly created entries receive a UUID v4; identifiers
/// written by older ledgers are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an entry adds to or draws from the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Income, EntryKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "수입" => Ok(EntryKind::Income),
            "expense" | "out" | "지출" => Ok(EntryKind::Expense),
            other => Err(format!("unknown entry type `{other}` (expected income or expense)")),
        }
    }
}

/// One recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub category: String,
    pub amount: u64,
    #[serde(default)]
    pub memo: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Largest amount a single entry may carry (one trillion won). Keeps monthly sums
    /// and the signed balance far inside the integer range.
    pub const MAX_AMOUNT: u64 = 1_000_000_000_000;

    /// Materializes a draft that has already passed validation.
    pub fn from_draft(
        id: EntryId,
        draft: EntryDraft,
        amount: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date: draft.date,
            kind: draft.kind,
            category: draft.category,
            amount,
            memo: draft.memo,
            created_at,
        }
    }
}

/// Unvalidated user input for creating or updating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub amount: i64,
    pub memo: String,
}

impl EntryDraft {
    pub fn new(
        date: NaiveDate,
        kind: EntryKind,
        category: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            memo: String::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}
