use chrono::NaiveDate;
use gagyebu_domain::{Entry, EntryId, YearMonth};

use crate::CoreError;

/// Abstraction over persistence backends capable of storing ledger entries.
///
/// Implementations own entry lifecycle; the reporting services only ever see the
/// materialized lists returned by the query methods.
pub trait EntryStore: Send + Sync {
    /// Stores a new entry. Fails when the identifier is already taken.
    fn insert(&self, entry: Entry) -> Result<(), CoreError>;

    /// Overwrites the stored entry carrying the same identifier.
    fn replace(&self, entry: Entry) -> Result<(), CoreError>;

    /// Removes and returns the entry with `id`.
    fn remove(&self, id: &EntryId) -> Result<Entry, CoreError>;

    fn get(&self, id: &EntryId) -> Result<Option<Entry>, CoreError>;

    /// Every stored entry, in insertion order.
    fn all(&self) -> Result<Vec<Entry>, CoreError>;

    fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Entry>, CoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|entry| entry.date == date)
            .collect())
    }

    fn query_by_month(&self, year_month: YearMonth) -> Result<Vec<Entry>, CoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|entry| year_month.contains(entry.date))
            .collect())
    }
}

/// Inserts `entry` into an in-order entry list, rejecting duplicate identifiers.
pub fn insert_unique(entries: &mut Vec<Entry>, entry: Entry) -> Result<(), CoreError> {
    if entries.iter().any(|existing| existing.id == entry.id) {
        return Err(CoreError::Validation(format!(
            "entry id `{}` already exists",
            entry.id
        )));
    }
    entries.push(entry);
    Ok(())
}

/// Replaces the entry with the same identifier in place, preserving list position.
pub fn replace_existing(entries: &mut [Entry], entry: Entry) -> Result<(), CoreError> {
    let slot = entries
        .iter_mut()
        .find(|existing| existing.id == entry.id)
        .ok_or_else(|| CoreError::EntryNotFound(entry.id.clone()))?;
    *slot = entry;
    Ok(())
}

/// Removes the entry with `id`, returning it.
pub fn remove_existing(entries: &mut Vec<Entry>, id: &EntryId) -> Result<Entry, CoreError> {
    let index = entries
        .iter()
        .position(|existing| &existing.id == id)
        .ok_or_else(|| CoreError::EntryNotFound(id.clone()))?;
    Ok(entries.remove(index))
}
