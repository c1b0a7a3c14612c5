use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use gagyebu_domain::{Entry, EntryId};

use crate::{
    storage::{insert_unique, remove_existing, replace_existing},
    CoreError, EntryStore,
};

/// Process-local entry store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Entry>>, CoreError> {
        self.entries
            .read()
            .map_err(|_| CoreError::Storage("entry store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Entry>>, CoreError> {
        self.entries
            .write()
            .map_err(|_| CoreError::Storage("entry store lock poisoned".into()))
    }
}

impl EntryStore for MemoryEntryStore {
    fn insert(&self, entry: Entry) -> Result<(), CoreError> {
        insert_unique(&mut *self.write()?, entry)
    }

    fn replace(&self, entry: Entry) -> Result<(), CoreError> {
        replace_existing(&mut *self.write()?, entry)
    }

    fn remove(&self, id: &EntryId) -> Result<Entry, CoreError> {
        remove_existing(&mut *self.write()?, id)
    }

    fn get(&self, id: &EntryId) -> Result<Option<Entry>, CoreError> {
        Ok(self.read()?.iter().find(|entry| &entry.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<Entry>, CoreError> {
        Ok(self.read()?.clone())
    }
}
