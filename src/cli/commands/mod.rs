pub mod entry;
pub mod report;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in entry::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
