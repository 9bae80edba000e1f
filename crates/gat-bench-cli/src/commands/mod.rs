use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub mod analyze;
pub mod baseline;
pub mod compare;
pub mod methods;
pub mod summary;

/// Load the optional `--baseline` CSV. An absent file leaves the recorded
/// baselines in place.
pub fn load_baselines(path: Option<&Path>) -> Result<Option<HashMap<String, f64>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let baselines = gat_bench::load_optional_baselines(path)
        .with_context(|| format!("loading baseline objectives from {}", path.display()))?;
    if let Some(map) = &baselines {
        info!(count = map.len(), path = %path.display(), "loaded baselines");
    }
    Ok(baselines)
}

/// File name for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
