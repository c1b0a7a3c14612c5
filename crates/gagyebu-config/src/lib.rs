//! gagyebu-config
//!
//! Persistent preferences for the household ledger: amount style, storage
//! backend, ledger location, and the category registry.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{default_base_dir, ConfigManager};
pub use model::{Config, StoreBackend};
