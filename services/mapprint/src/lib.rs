//! Map print CLI
//!
//! Loads a map snapshot from disk, builds its print specification and
//! either writes the specification out or sends it to a print service.

pub mod client;
pub mod input;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use print_spec::{PrintSpec, SpecAssembler, SpecBuild};
use tracing::{info, warn};

pub use client::{HttpPrintService, HttpStyleTranslator};
pub use input::load_map_state;

/// Build the print specification for the map snapshot at `map_path`.
pub async fn build_from_file(assembler: &SpecAssembler, map_path: &Path) -> Result<SpecBuild> {
    let map = load_map_state(map_path)
        .with_context(|| format!("Failed to load map snapshot {:?}", map_path))?;
    let build = assembler
        .build_spec(&map)
        .await
        .with_context(|| format!("Failed to build print specification for {:?}", map_path))?;

    log_diagnostics(&build);
    Ok(build)
}

/// Surface translation findings to the operator.
pub fn log_diagnostics(build: &SpecBuild) {
    for diagnostic in &build.diagnostics {
        if diagnostic.is_error() {
            warn!(layer = ?diagnostic.layer, kind = ?diagnostic.kind, "{}", diagnostic.message);
        } else {
            info!(layer = ?diagnostic.layer, kind = ?diagnostic.kind, "{}", diagnostic.message);
        }
    }
}

/// Write `spec` as pretty JSON to `output`, or to stdout when absent.
pub fn write_spec(spec: &PrintSpec, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(spec).context("Failed to serialize print spec")?;

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote print specification to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
