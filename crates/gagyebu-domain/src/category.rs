//! Static category registry and chart palette.

use serde::{Deserialize, Serialize};

use crate::entry::EntryKind;

const DEFAULT_INCOME: [&str; 2] = ["엄마 월급여", "아빠 월급여"];
const DEFAULT_EXPENSE: [&str; 7] = ["식비", "생필품비", "의료비", "세금", "보험", "이자", "기타"];
const DEFAULT_PALETTE: [&str; 10] = [
    "#3f51b5", "#2196f3", "#00bcd4", "#4caf50", "#ff9800", "#f44336", "#9c27b0", "#009688",
    "#ff5722", "#607d8b",
];

/// Ordered category names per entry kind plus the ordered display palette.
///
/// The registry is read-only configuration: a category's color is derived from its
/// position in the canonical list, cycling through the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    pub income: Vec<String>,
    pub expense: Vec<String>,
    #[serde(default = "CategoryRegistry::default_palette")]
    pub palette: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME.iter().map(|name| name.to_string()).collect(),
            expense: DEFAULT_EXPENSE.iter().map(|name| name.to_string()).collect(),
            palette: Self::default_palette(),
        }
    }
}

impl CategoryRegistry {
    pub fn default_palette() -> Vec<String> {
        DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect()
    }

    /// Canonical category list for `kind`, in registry order.
    pub fn canonical(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }

    pub fn is_canonical(&self, kind: EntryKind, name: &str) -> bool {
        self.canonical(kind).iter().any(|candidate| candidate == name)
    }

    pub fn position(&self, kind: EntryKind, name: &str) -> Option<usize> {
        self.canonical(kind).iter().position(|candidate| candidate == name)
    }

    /// Palette color for a slot index, cycling when the index exceeds the palette.
    pub fn color_at(&self, index: usize) -> Option<&str> {
        cycle_color(&self.palette, index)
    }
}

/// `palette[index % len]`, or `None` for an empty palette.
pub fn cycle_color(palette: &[String], index: usize) -> Option<&str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()].as_str())
}
