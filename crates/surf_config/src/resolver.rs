//! Backend resolution.
//!
//! Turns the settings and backends documents into a [`ResolvedBackend`]. The
//! selected backend must exist in the catalog; there is no fallback backend.

use crate::backend::{BackendDescriptor, ResolvedBackend};
use crate::document::{expect_object, require_field, require_str, Document};
use crate::error::ConfigError;
use crate::paths::PluginPaths;
use std::path::Path;
use tracing::{debug, info};

/// Settings key naming the active backend.
pub const DATABASE_TYPE_KEY: &str = "database_type";

/// Top-level section of the combined `database.json` document.
pub const COMBINED_SECTION_KEY: &str = "database";

/// Key naming the active backend inside the combined section.
pub const COMBINED_TYPE_KEY: &str = "type";

/// Resolves the active backend from the split `settings.json` +
/// `databases.json` layout.
///
/// # Errors
///
/// * `MissingField` / `TypeMismatch` when `database_type` or one of the
///   catalog entry fields is absent or not a string
/// * `UnknownBackendType` when the catalog has no entry for the selected type
pub fn resolve_backend(
    settings: &Document,
    backends: &Document,
    plugin_dir: &Path,
) -> Result<ResolvedBackend, ConfigError> {
    let backend_type = settings.require_str(DATABASE_TYPE_KEY)?;
    let catalog = backends.as_object()?;

    let entry = catalog
        .get(backend_type)
        .ok_or_else(|| ConfigError::UnknownBackendType {
            document: backends.name().to_string(),
            backend_type: backend_type.to_string(),
        })?;

    let descriptor = BackendDescriptor::from_entry(backends.name(), backend_type, entry)?;
    debug!("Backend '{}' descriptor: {:?}", backend_type, descriptor);

    Ok(ResolvedBackend::new(backend_type, plugin_dir, descriptor))
}

/// Resolves the active backend from the combined single-file layout:
///
/// ```json
/// { "database": { "type": "sqlite", "sqlite": { "path": "data", "name": "surf.db", "schema": "v1" } } }
/// ```
pub fn resolve_combined_backend(
    database: &Document,
    plugin_dir: &Path,
) -> Result<ResolvedBackend, ConfigError> {
    let root = database.as_object()?;
    let section = require_field(database.name(), root, COMBINED_SECTION_KEY)?;
    let section = expect_object(database.name(), COMBINED_SECTION_KEY, section)?;

    let label = format!("{}[\"{}\"]", database.name(), COMBINED_SECTION_KEY);
    let backend_type = require_str(&label, section, COMBINED_TYPE_KEY)?;

    let entry = section
        .get(backend_type)
        .ok_or_else(|| ConfigError::UnknownBackendType {
            document: label.clone(),
            backend_type: backend_type.to_string(),
        })?;

    let descriptor = BackendDescriptor::from_entry(&label, backend_type, entry)?;
    Ok(ResolvedBackend::new(backend_type, plugin_dir, descriptor))
}

/// Which configuration files describe the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayout {
    /// `settings.json` selects a backend from `databases.json`
    Split,
    /// Everything lives in `database.json`
    Combined,
}

impl ConfigLayout {
    /// Picks the layout from the files present on disk.
    ///
    /// Split wins whenever `settings.json` exists. Combined is used only when
    /// `settings.json` is absent and `database.json` is present. With neither
    /// file the split layout is chosen so the missing settings file is what
    /// gets reported.
    pub fn detect(paths: &PluginPaths) -> Self {
        if !paths.settings_cfg_path.exists() && paths.combined_cfg_path.is_file() {
            ConfigLayout::Combined
        } else {
            ConfigLayout::Split
        }
    }

    /// The files this layout reads, in the order they are opened.
    pub fn config_files(self, paths: &PluginPaths) -> Vec<&Path> {
        match self {
            ConfigLayout::Split => vec![
                paths.settings_cfg_path.as_path(),
                paths.backends_cfg_path.as_path(),
            ],
            ConfigLayout::Combined => vec![paths.combined_cfg_path.as_path()],
        }
    }
}

/// Opens the configuration documents under `paths` and resolves the backend.
///
/// Documents are closed again before this returns, whatever the outcome.
pub fn load_backend(paths: &PluginPaths) -> Result<ResolvedBackend, ConfigError> {
    load_backend_with_layout(paths, ConfigLayout::detect(paths))
}

/// [`load_backend`] with the layout chosen by the caller.
pub fn load_backend_with_layout(
    paths: &PluginPaths,
    layout: ConfigLayout,
) -> Result<ResolvedBackend, ConfigError> {
    info!("📄 Using {:?} configuration layout in {}", layout, paths.configs_dir().display());

    match layout {
        ConfigLayout::Split => {
            let settings = Document::open(&paths.settings_cfg_path)?;
            let backends = Document::open(&paths.backends_cfg_path)?;
            resolve_backend(&settings, &backends, &paths.plugin_dir)
        }
        ConfigLayout::Combined => {
            let database = Document::open(&paths.combined_cfg_path)?;
            resolve_combined_backend(&database, &paths.plugin_dir)
        }
    }
}
