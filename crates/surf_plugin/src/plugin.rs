//! # Plugin Interface
//!
//! Traits and types shared between the host and any plugin it loads.
//!
//! ## Plugin Lifecycle
//!
//! 1. **Exposure** - The library exposes one process-wide instance through
//!    the `expose_plugin!` macro
//! 2. **Load** - `load()` is called once with the host API; returning an error
//!    refuses the load and the plugin is never used
//! 3. **Level events** - If the plugin registered itself as a level listener,
//!    the host forwards level init/shutdown notifications
//! 4. **Unload** - `unload()` is called before the library is released

use crate::host::{HostApi, LevelInit};
use surf_config::ConfigError;

/// Static identification strings reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub author: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub license: &'static str,
    pub version: &'static str,
    pub date: &'static str,
    /// Prefix for console output
    pub log_tag: &'static str,
}

/// Receives level notifications from the host.
pub trait LevelListener {
    fn on_level_init(&mut self, host: &dyn HostApi, level: &LevelInit);

    fn on_level_shutdown(&mut self, host: &dyn HostApi);
}

/// A plugin the host can load and unload.
///
/// All calls happen on the host's thread, one at a time. `load` must finish
/// (or fail) before the host continues, so it must not block on anything but
/// local file reads.
pub trait Plugin: LevelListener + Send {
    fn info(&self) -> &PluginInfo;

    /// Loads the plugin.
    ///
    /// # Arguments
    ///
    /// * `host` - The host API for this load attempt
    /// * `late` - `true` when loaded after the server already started a level
    ///
    /// # Returns
    ///
    /// `Ok(())` to accept the load, or `Err(PluginError)` to refuse it. The
    /// error's message is what the host reports to the operator.
    fn load(&mut self, host: &dyn HostApi, late: bool) -> Result<(), PluginError>;

    /// Unloads the plugin. Errors are reported but do not stop the unload.
    fn unload(&mut self, host: &dyn HostApi) -> Result<(), PluginError>;
}

/// Errors that can occur during plugin operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The load was refused before configuration was read
    #[error("Plugin load failed: {0}")]
    LoadFailed(String),
    /// The configuration could not be resolved
    #[error("Plugin configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Runtime error such as a panic inside a callback
    #[error("Plugin runtime error: {0}")]
    Runtime(String),
}

impl PluginError {
    /// Converts a caught panic payload into a [`PluginError::Runtime`].
    pub fn from_panic(panic_info: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
            format!("Plugin panicked: {}", s)
        } else if let Some(s) = panic_info.downcast_ref::<String>() {
            format!("Plugin panicked: {}", s)
        } else {
            "Plugin panicked with unknown error".to_string()
        };

        PluginError::Runtime(message)
    }
}
