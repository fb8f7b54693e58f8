//! Resolution of engine options and the classification search from CLI input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use crosswalk_map::{ClassificationSearch, StaticCatalog};
use crosswalk_model::EngineOptions;
use tracing::debug;

/// Build engine options with increasing precedence: defaults, the config
/// file, `CROSSWALK_RESOURCES_DIR`, then `--resources-dir`.
pub fn resolve_options(
    config: Option<&Path>,
    resources_dir: Option<&PathBuf>,
) -> Result<EngineOptions> {
    let options = match config {
        Some(path) => EngineOptions::from_toml_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineOptions::default(),
    };
    let mut options = options.with_env_overrides();
    if let Some(dir) = resources_dir {
        options = options.with_resources_dir(dir.clone());
    }
    debug!(resources_dir = %options.resources_dir.display(), "resolved engine options");
    Ok(options)
}

/// The catalog file when given, otherwise the built-in offline catalog.
pub fn resolve_search(catalog: Option<&Path>) -> Result<Arc<dyn ClassificationSearch>> {
    let catalog = match catalog {
        Some(path) => StaticCatalog::from_json_path(path)
            .with_context(|| format!("load catalog {}", path.display()))?,
        None => StaticCatalog::builtin(),
    };
    debug!(entries = catalog.entries().len(), "classification catalog ready");
    Ok(Arc::new(catalog))
}
