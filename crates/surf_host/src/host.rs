//! The development host itself.
//!
//! `PluginHost` plays the game server's part: it hands the plugin a base
//! directory, forwards console output to `tracing`, and drives load, level
//! changes and unload on a single thread.

use crate::error::HostError;
use crate::logging::CONSOLE_TARGET;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use surf_plugin::{HostApi, LevelInit, Plugin, PluginError};
use tracing::{error, info, warn};

pub struct PluginHost {
    base_dir: PathBuf,
    level_listener: Cell<bool>,
}

impl PluginHost {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            level_listener: Cell::new(false),
        }
    }

    /// Whether the loaded plugin asked for level notifications.
    pub fn has_level_listener(&self) -> bool {
        self.level_listener.get()
    }

    /// Loads the plugin. A refused load is returned as
    /// [`HostError::LoadRefused`] carrying the plugin's own error.
    pub fn load(&self, plugin: &Mutex<dyn Plugin>, late: bool) -> Result<(), HostError> {
        let mut guard = lock(plugin)?;
        let name = guard.info().name;

        info!("🔌 Loading plugin {} {}", name, guard.info().version);
        self.level_listener.set(false);

        let result = catch_unwind(AssertUnwindSafe(|| guard.load(self, late)))
            .unwrap_or_else(|panic_info| Err(PluginError::from_panic(panic_info)));

        match result {
            Ok(()) => {
                info!("✅ Plugin {} loaded", name);
                Ok(())
            }
            Err(source) => {
                error!("❌ Plugin {} refused to load: {}", name, source);
                self.level_listener.set(false);
                Err(HostError::LoadRefused {
                    plugin: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Starts and ends one level, notifying the plugin if it is listening.
    pub fn cycle_level(&self, plugin: &Mutex<dyn Plugin>, level: &LevelInit) -> Result<(), HostError> {
        info!("🗺️ Changing level to {}", level.map_name);
        if !self.has_level_listener() {
            return Ok(());
        }

        let mut guard = lock(plugin)?;
        guard.on_level_init(self, level);
        guard.on_level_shutdown(self);
        Ok(())
    }

    /// Unloads the plugin. Unload errors are logged, never fatal.
    pub fn unload(&self, plugin: &Mutex<dyn Plugin>) -> Result<(), HostError> {
        let mut guard = lock(plugin)?;
        let name = guard.info().name;

        let result = catch_unwind(AssertUnwindSafe(|| guard.unload(self)))
            .unwrap_or_else(|panic_info| Err(PluginError::from_panic(panic_info)));

        if let Err(e) = result {
            warn!("Plugin {} reported an error while unloading: {}", name, e);
        }

        self.level_listener.set(false);
        info!("🛑 Plugin {} unloaded", name);
        Ok(())
    }

    /// Full session: load, cycle through `maps`, unload.
    pub fn run(&self, plugin: &Mutex<dyn Plugin>, maps: &[String]) -> Result<(), HostError> {
        self.load(plugin, false)?;

        for map in maps {
            self.cycle_level(plugin, &LevelInit::new(map.as_str()))?;
        }

        self.unload(plugin)
    }
}

impl HostApi for PluginHost {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn console_print(&self, message: &str) {
        info!(target: CONSOLE_TARGET, "{}", message);
    }

    fn add_level_listener(&self) {
        self.level_listener.set(true);
    }
}

fn lock<'a>(
    plugin: &'a Mutex<dyn Plugin + 'static>,
) -> Result<MutexGuard<'a, dyn Plugin + 'static>, HostError> {
    plugin.lock().map_err(|_| HostError::Poisoned)
}
