pub mod completions;
pub mod draft;
pub mod gaps;
pub mod inventory;
pub mod links;
pub mod phase;
pub mod plan;

use std::io::Read;
use std::path::Path;

use scope_core::config::ProjectConfig;
use scope_core::inventory::{ContentInventory, FsContentStore, InventoryError};

/// Read the configured content root.
pub fn read_inventory(
    project_root: &Path,
    config: &ProjectConfig,
) -> Result<ContentInventory, InventoryError> {
    let store = FsContentStore::new(config.content_root(project_root));
    ContentInventory::collect(&store)
}

/// Read the inventory, treating a missing content root as no content.
pub fn read_inventory_or_empty(project_root: &Path, config: &ProjectConfig) -> ContentInventory {
    read_inventory(project_root, config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "continuing with an empty inventory");
        ContentInventory::default()
    })
}

/// Read a file argument; `-` means stdin.
pub fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
}
