//! gagyebu-domain
//!
//! Pure domain models for the household ledger (entries, categories, report shapes).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod entry;
pub mod report;

pub use category::*;
pub use common::*;
pub use entry::*;
pub use report::*;
