//! Error types for the development host.

use surf_plugin::PluginError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Host configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Host configuration serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid host configuration: {0}")]
    InvalidConfig(String),

    #[error("Library loading error: {0}")]
    LibraryError(String),

    #[error("Plugin ABI mismatch: plugin {plugin}, host {host}")]
    AbiMismatch { plugin: String, host: String },

    #[error("Plugin {plugin} failed to load: {source}")]
    LoadRefused {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("Plugin instance lock poisoned")]
    Poisoned,
}
