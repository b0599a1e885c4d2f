//! # cs2-surf development host
//!
//! Stands in for the game server's plugin loader so the plugin can be
//! exercised outside the game: it hands the plugin a base directory, loads
//! it, cycles through a few maps and unloads it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the built-in plugin against a game install
//! surf-host --base-dir /srv/cs2/game/csgo --map surf_utopia_v3
//!
//! # Load a plugin library instead
//! surf-host --plugin target/debug/libsurf_plugin.so --log-level debug
//! ```
//!
//! Host settings live in a TOML file (default: `host.toml`), created with
//! defaults when missing. Command-line options override it.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod logging;

pub use cli::CliArgs;
pub use config::{HostConfig, HostSettings, LoggingSettings};
pub use error::HostError;
pub use host::PluginHost;
pub use loader::{PluginHandle, PluginLibrary};

use tracing::info;

/// Runs one host session for already-merged configuration.
///
/// # Process
///
/// 1. Open the plugin (library or built-in)
/// 2. Load it against the configured base directory
/// 3. Cycle through the configured maps
/// 4. Unload it
pub fn run_session(config: &HostConfig, allow_abi_mismatch: bool) -> Result<(), HostError> {
    let plugin_path = config.plugin_path();
    let handle = PluginHandle::open(plugin_path.as_deref(), allow_abi_mismatch)?;

    let host = PluginHost::new(config.base_dir());
    info!("🎮 Host base directory: {}", config.host.base_dir);

    host.run(handle.plugin(), &config.host.maps)
}

/// Entry point used by the `surf-host` binary.
///
/// Parses the command line, loads and validates the host configuration,
/// initializes logging and runs a session.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = HostConfig::load_from_file(&args.config_path)?;
    config.apply_cli(&args);
    config.validate().map_err(HostError::InvalidConfig)?;

    logging::setup_logging(&config.logging)?;
    info!("✅ Host configuration loaded from {}", args.config_path.display());

    run_session(&config, args.danger_allow_abi_mismatch)?;
    Ok(())
}
