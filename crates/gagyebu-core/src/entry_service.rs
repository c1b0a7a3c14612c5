//! Entry lifecycle: validation at the edge, then delegation to an [`EntryStore`].

use gagyebu_domain::{Entry, EntryDraft, EntryId};

use crate::{Clock, CoreError, EntryStore};

/// Provides create, update, and delete helpers for ledger entries.
pub struct EntryService;

impl EntryService {
    /// Checks a draft against the entry invariants: non-blank category and an amount in
    /// `1..=Entry::MAX_AMOUNT`.
    pub fn validate(draft: &EntryDraft) -> Result<u64, CoreError> {
        if draft.category.trim().is_empty() {
            return Err(CoreError::Validation("category must not be empty".into()));
        }
        if draft.amount <= 0 {
            return Err(CoreError::Validation(format!(
                "amount must be greater than zero (got {})",
                draft.amount
            )));
        }
        let amount = draft.amount as u64;
        if amount > Entry::MAX_AMOUNT {
            return Err(CoreError::Validation(format!(
                "amount must not exceed {} (got {amount})",
                Entry::MAX_AMOUNT
            )));
        }
        Ok(amount)
    }

    /// Records a new entry stamped with a fresh id and the clock's current time.
    pub fn create(
        store: &dyn EntryStore,
        clock: &dyn Clock,
        draft: EntryDraft,
    ) -> Result<Entry, CoreError> {
        let draft = normalize(draft);
        let amount = Self::validate(&draft)?;
        let entry = Entry::from_draft(EntryId::generate(), draft, amount, clock.now());
        store.insert(entry.clone())?;
        tracing::info!(id = %entry.id, kind = %entry.kind, amount = entry.amount, "entry created");
        Ok(entry)
    }

    /// Rewrites an entry's fields. Identifier and creation time are preserved, the kind
    /// may change.
    pub fn update(
        store: &dyn EntryStore,
        id: &EntryId,
        draft: EntryDraft,
    ) -> Result<Entry, CoreError> {
        let draft = normalize(draft);
        let amount = Self::validate(&draft)?;
        let existing = store
            .get(id)?
            .ok_or_else(|| CoreError::EntryNotFound(id.clone()))?;
        let entry = Entry::from_draft(existing.id, draft, amount, existing.created_at);
        store.replace(entry.clone())?;
        tracing::info!(id = %entry.id, "entry updated");
        Ok(entry)
    }

    pub fn delete(store: &dyn EntryStore, id: &EntryId) -> Result<Entry, CoreError> {
        let removed = store.remove(id)?;
        tracing::info!(id = %removed.id, "entry deleted");
        Ok(removed)
    }
}

fn normalize(mut draft: EntryDraft) -> EntryDraft {
    draft.category = draft.category.trim().to_string();
    draft.memo = draft.memo.trim().to_string();
    draft
}
