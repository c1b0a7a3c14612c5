//! Household ledger (가계부) terminal front end.
//!
//! Wires the aggregation engine in `gagyebu-core` to a configured entry store
//! and exposes the `gagyebu_cli` shell.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("gagyebu tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
