//! Map snapshot loading.

use print_common::{MapState, PrintError, PrintResult};
use std::path::Path;

/// Load a map snapshot from a `.json`, `.yaml` or `.yml` file.
pub fn load_map_state(path: &Path) -> PrintResult<MapState> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let content = std::fs::read_to_string(path)?;
    let map: MapState = match ext.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => {
            return Err(PrintError::InvalidInput(format!(
                "Unsupported map snapshot format {:?}, expected .json, .yaml or .yml",
                path
            )))
        }
    };

    tracing::debug!("Loaded map snapshot with {} layers from {:?}", map.layers.len(), path);
    Ok(map)
}
