//! gagyebu-core
//!
//! Aggregation and reporting engine for the household ledger, plus the entry
//! lifecycle services that sit in front of an [`storage::EntryStore`].
//! Depends on gagyebu-domain. No CLI, no terminal I/O, no file access.

pub mod chart_service;
pub mod entry_service;
pub mod error;
pub mod format;
pub mod history_service;
pub mod memory_store;
pub mod storage;
pub mod summary_service;
pub mod time;


pub use chart_service::*;
pub use entry_service::*;
pub use error::CoreError;
pub use history_service::*;
pub use memory_store::MemoryEntryStore;
pub use storage::EntryStore;
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
