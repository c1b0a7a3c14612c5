use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use gagyebu_core::{
    storage::{insert_unique, remove_existing, replace_existing},
    CoreError, EntryStore,
};
use gagyebu_domain::{Entry, EntryId};

const LEDGER_EXTENSION: &str = "json";
const LEDGERS_DIR: &str = "ledgers";
const TMP_SUFFIX: &str = "tmp";

/// File-backed entry store holding one ledger as a JSON array of entries.
///
/// Every call reads the file fresh; mutations rewrite it through a temporary
/// sibling followed by a rename. A lock serializes read-modify-write cycles
/// within the process.
#[derive(Debug)]
pub struct JsonEntryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonEntryStore {
    /// Opens the ledger `name` under `<data_dir>/ledgers/`, creating the directory.
    pub fn open(data_dir: &Path, name: &str) -> Result<Self, CoreError> {
        Self::new(data_dir.join(LEDGERS_DIR), name)
    }

    pub fn new(ledgers_dir: PathBuf, name: &str) -> Result<Self, CoreError> {
        fs::create_dir_all(&ledgers_dir)?;
        let path = ledgers_dir.join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION));
        tracing::debug!(path = %path.display(), "opened json ledger");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.lock
            .lock()
            .map_err(|_| CoreError::Storage("json ledger lock poisoned".into()))
    }

    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<Entry>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self.guard()?;
        let mut entries = load_entries_from_path(&self.path)?;
        let outcome = change(&mut entries)?;
        save_entries_to_path(&entries, &self.path)?;
        Ok(outcome)
    }
}

impl EntryStore for JsonEntryStore {
    fn insert(&self, entry: Entry) -> Result<(), CoreError> {
        self.modify(|entries| insert_unique(entries, entry))
    }

    fn replace(&self, entry: Entry) -> Result<(), CoreError> {
        self.modify(|entries| replace_existing(entries, entry))
    }

    fn remove(&self, id: &EntryId) -> Result<Entry, CoreError> {
        self.modify(|entries| remove_existing(entries, id))
    }

    fn get(&self, id: &EntryId) -> Result<Option<Entry>, CoreError> {
        Ok(self.all()?.into_iter().find(|entry| &entry.id == id))
    }

    fn all(&self) -> Result<Vec<Entry>, CoreError> {
        let _guard = self.guard()?;
        load_entries_from_path(&self.path)
    }
}

/// Reads a ledger file. A missing or blank file is an empty ledger.
pub fn load_entries_from_path(path: &Path) -> Result<Vec<Entry>, CoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "ledger file is not valid entry json");
        CoreError::Serde(format!("{}: {}", path.display(), err))
    })
}

/// Writes a ledger file atomically.
pub fn save_entries_to_path(entries: &[Entry], path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data =
        serde_json::to_string_pretty(entries).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_file(&tmp, &data)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "ledger saved");
    Ok(())
}

/// File-safe slug for a ledger name. Letters (any script) and digits survive,
/// everything else becomes `_`.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
