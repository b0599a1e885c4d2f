//! The cs2-surf plugin.

use crate::host::{HostApi, LevelInit};
use crate::plugin::{LevelListener, Plugin, PluginError, PluginInfo};
use const_format::concatcp;
use surf_config::{
    lexically_normal, load_backend_with_layout, resolve_plugin_paths, ConfigLayout, PluginPaths,
    ResolvedBackend, PLUGIN_NAME,
};
use tracing::{debug, error, info, warn};

/// Identification reported to the host.
pub const SURF_PLUGIN_INFO: PluginInfo = PluginInfo {
    author: "CCarrMcMahon",
    name: PLUGIN_NAME,
    description: "An open source plugin for surfing in CS2.",
    url: "N/A",
    license: "GNU GENERAL PUBLIC LICENSE",
    version: "v0.0.1-alpha",
    date: match option_env!("SURF_BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
    log_tag: concatcp!("[", PLUGIN_NAME, "]"),
};

/// Surf gameplay plugin. For now it validates its storage configuration on
/// load and logs lifecycle events.
pub struct SurfPlugin {
    info: PluginInfo,
    paths: Option<PluginPaths>,
    backend: Option<ResolvedBackend>,
    current_map: Option<String>,
}

impl SurfPlugin {
    pub fn new() -> Self {
        Self {
            info: SURF_PLUGIN_INFO,
            paths: None,
            backend: None,
            current_map: None,
        }
    }

    /// The backend resolved by the last successful load.
    pub fn backend(&self) -> Option<&ResolvedBackend> {
        self.backend.as_ref()
    }

    pub fn paths(&self) -> Option<&PluginPaths> {
        self.paths.as_ref()
    }

    pub fn current_map(&self) -> Option<&str> {
        self.current_map.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }

    fn print(&self, host: &dyn HostApi, message: &str) {
        host.console_print(&format!("{} {}", self.info.log_tag, message));
    }
}

impl Default for SurfPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SurfPlugin {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn load(&mut self, host: &dyn HostApi, late: bool) -> Result<(), PluginError> {
        self.print(host, "Load() called.");
        debug!("🔌 Loading {} {} (late: {})", self.info.name, self.info.version, late);

        // A refused load must not leave a previous load's state behind
        self.paths = None;
        self.backend = None;

        let base_dir = host.base_dir();
        if base_dir.as_os_str().is_empty() {
            return Err(PluginError::LoadFailed(
                "host supplied an empty base directory".to_string(),
            ));
        }

        host.add_level_listener();

        let paths = resolve_plugin_paths(base_dir);
        let layout = ConfigLayout::detect(&paths);

        let backend = match load_backend_with_layout(&paths, layout) {
            Ok(backend) => backend,
            Err(e) => {
                error!("❌ {} refusing to load: {}", self.info.name, e);
                return Err(e.into());
            }
        };

        for config_file in layout.config_files(&paths) {
            self.print(
                host,
                &format!(
                    "The path to the database cfg is: {}",
                    lexically_normal(config_file).display()
                ),
            );
        }

        match host.current_dir() {
            Ok(cwd) => self.print(
                host,
                &format!("Current working directory: {}", lexically_normal(&cwd).display()),
            ),
            Err(e) => warn!("Could not read the current working directory: {}", e),
        }

        self.print(
            host,
            &format!("The path to the database is: {}", backend.display_path().display()),
        );

        info!(
            "✅ {} loaded with '{}' backend at {}",
            self.info.name,
            backend.backend_type,
            backend.display_path().display()
        );

        self.paths = Some(paths);
        self.backend = Some(backend);
        Ok(())
    }

    fn unload(&mut self, host: &dyn HostApi) -> Result<(), PluginError> {
        self.print(host, "Unload() called.");

        self.backend = None;
        self.paths = None;
        self.current_map = None;

        info!("🛑 {} unloaded", self.info.name);
        Ok(())
    }
}

impl LevelListener for SurfPlugin {
    fn on_level_init(&mut self, host: &dyn HostApi, level: &LevelInit) {
        self.print(
            host,
            &format!("OnLevelInit() called with map \"{}\".", level.map_name),
        );
        debug!(
            "Level init: map={} old_level={:?} load_game={} background={}",
            level.map_name, level.old_level, level.load_game, level.background
        );
        self.current_map = Some(level.map_name.clone());
    }

    fn on_level_shutdown(&mut self, host: &dyn HostApi) {
        self.print(host, "OnLevelShutdown() called.");
        self.current_map = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_info() {
        let plugin = SurfPlugin::new();
        let info = plugin.info();

        assert_eq!(info.name, "cs2-surf");
        assert_eq!(info.author, "CCarrMcMahon");
        assert_eq!(info.version, "v0.0.1-alpha");
        assert_eq!(info.license, "GNU GENERAL PUBLIC LICENSE");
        assert_eq!(info.url, "N/A");
        assert_eq!(info.log_tag, "[cs2-surf]");
        assert!(!info.date.is_empty());
    }

    #[test]
    fn test_new_plugin_is_not_loaded() {
        let plugin = SurfPlugin::default();
        assert!(!plugin.is_loaded());
        assert!(plugin.backend().is_none());
        assert!(plugin.paths().is_none());
        assert!(plugin.current_map().is_none());
    }
}
