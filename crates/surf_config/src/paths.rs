//! Plugin directory and configuration file locations.
//!
//! Everything here is pure path arithmetic on top of the base directory the
//! host hands us at load time. Nothing touches the filesystem.

use const_format::concatcp;
use std::path::{Component, Path, PathBuf};

/// Name of the plugin; also the name of its install directory under `addons/`.
pub const PLUGIN_NAME: &str = "cs2-surf";

/// Directory under the host base directory that holds every plugin.
pub const ADDONS_DIR: &str = "addons";

/// Directory under the plugin directory that holds configuration files.
pub const CONFIGS_DIR: &str = "configs";

pub const SETTINGS_CONFIG_FILE: &str = "settings.json";

/// Base name of the backends catalog.
pub const DATABASES_CONFIG_NAME: &str = "databases";

pub const BACKENDS_CONFIG_FILE: &str = concatcp!(DATABASES_CONFIG_NAME, ".json");

/// Single-file layout used by the first plugin builds.
pub const COMBINED_CONFIG_FILE: &str = "database.json";

/// All locations derived from the host base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    /// `<base>/addons/cs2-surf`
    pub plugin_dir: PathBuf,
    /// `<plugin>/configs/settings.json`
    pub settings_cfg_path: PathBuf,
    /// `<plugin>/configs/databases.json`
    pub backends_cfg_path: PathBuf,
    /// `<plugin>/configs/database.json`
    pub combined_cfg_path: PathBuf,
}

impl PluginPaths {
    /// Directory holding the configuration files.
    pub fn configs_dir(&self) -> PathBuf {
        self.plugin_dir.join(CONFIGS_DIR)
    }
}

/// Derives the plugin directory and configuration file paths from the host
/// base directory.
///
/// The base directory is expected to be non-empty. It is not checked for
/// existence; missing files surface later when the documents are opened.
///
/// # Examples
///
/// ```
/// use surf_config::resolve_plugin_paths;
/// use std::path::Path;
///
/// let paths = resolve_plugin_paths("/srv/game");
/// assert_eq!(paths.plugin_dir, Path::new("/srv/game/addons/cs2-surf"));
/// assert_eq!(
///     paths.settings_cfg_path,
///     Path::new("/srv/game/addons/cs2-surf/configs/settings.json")
/// );
/// ```
pub fn resolve_plugin_paths(base_dir: impl AsRef<Path>) -> PluginPaths {
    let plugin_dir = base_dir.as_ref().join(ADDONS_DIR).join(PLUGIN_NAME);
    let configs_dir = plugin_dir.join(CONFIGS_DIR);

    PluginPaths {
        settings_cfg_path: configs_dir.join(SETTINGS_CONFIG_FILE),
        backends_cfg_path: configs_dir.join(BACKENDS_CONFIG_FILE),
        combined_cfg_path: configs_dir.join(COMBINED_CONFIG_FILE),
        plugin_dir,
    }
}

/// Lexically normalizes a path for display: drops `.` components and folds
/// `name/..` pairs. Symlinks are not consulted.
pub fn lexically_normal(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
