//! Configuration resolution for the cs2-surf plugin.
//!
//! The host gives the plugin a single input, its base directory. From there
//! this crate:
//!
//! 1. derives the plugin directory and configuration file locations
//!    ([`resolve_plugin_paths`]),
//! 2. parses the configuration documents ([`Document`]),
//! 3. validates the selected storage backend and computes the absolute path
//!    of its data file ([`resolve_backend`], [`load_backend`]).
//!
//! Resolution never opens the data store it locates.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/addons/cs2-surf/configs/settings.json   { "database_type": "sqlite" }
//! <base_dir>/addons/cs2-surf/configs/databases.json  { "sqlite": { "path": "data", "name": "surf.db", "schema": "v1" } }
//! ```

mod backend;
mod document;
mod error;
mod paths;
mod resolver;

pub use backend::{BackendDescriptor, BackendKind, ResolvedBackend};
pub use document::Document;
pub use error::{ConfigError, ConfigErrorKind};
pub use paths::{
    lexically_normal, resolve_plugin_paths, PluginPaths, ADDONS_DIR, BACKENDS_CONFIG_FILE,
    COMBINED_CONFIG_FILE, CONFIGS_DIR, DATABASES_CONFIG_NAME, PLUGIN_NAME, SETTINGS_CONFIG_FILE,
};
pub use resolver::{
    load_backend, load_backend_with_layout, resolve_backend, resolve_combined_backend,
    ConfigLayout, COMBINED_SECTION_KEY, COMBINED_TYPE_KEY, DATABASE_TYPE_KEY,
};

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ConfigError>;
