//! # cs2-surf plugin
//!
//! Plugin library loaded by a game-server host. On load it resolves its
//! install directory from the host's base directory, validates the storage
//! backend configuration and reports where the backend's data file lives.
//! Any configuration problem refuses the load.
//!
//! The library exposes exactly one plugin instance, [`SURF_PLUGIN`], through
//! the `get_plugin_instance` symbol generated by [`expose_plugin!`]. All the
//! actual resolution lives in `surf_config` and takes its inputs explicitly.

mod host;
#[macro_use]
mod macros;
mod plugin;
mod surf;

pub use host::{HostApi, LevelInit};
pub use plugin::{LevelListener, Plugin, PluginError, PluginInfo};
pub use surf::{SurfPlugin, SURF_PLUGIN_INFO};
pub use surf_config::PLUGIN_NAME;

/// Revision of the [`Plugin`]/[`HostApi`] interface. Bump on any change to
/// either trait.
pub const PLUGIN_INTERFACE_REVISION: &str = "1";

/// Version of the compiler that built this crate, detected by `build.rs`.
pub const RUSTC_VERSION: &str = env!("SURF_RUSTC_VERSION");

/// ABI version for plugin compatibility validation.
/// Format: "crate_version:rust_version:interface_revision", e.g. "0.1.0:1.75.0:1"
pub const PLUGIN_ABI_VERSION: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    ":",
    RUSTC_VERSION,
    ":",
    PLUGIN_INTERFACE_REVISION
);

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use tracing;

    pub const PLUGIN_ABI_VERSION_NUL: &str = const_format::concatcp!(super::PLUGIN_ABI_VERSION, "\0");
}

expose_plugin!(SurfPlugin, SURF_PLUGIN);

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_abi_version_export() {
        let version = unsafe { CStr::from_ptr(get_plugin_abi_version()) };
        assert_eq!(version.to_str().unwrap(), PLUGIN_ABI_VERSION);
        assert!(PLUGIN_ABI_VERSION.ends_with(":1"));
    }

    #[test]
    fn test_abi_version_includes_compiler() {
        assert!(!RUSTC_VERSION.is_empty());

        let parts: Vec<&str> = PLUGIN_ABI_VERSION.split(':').collect();
        assert_eq!(
            parts,
            vec![env!("CARGO_PKG_VERSION"), RUSTC_VERSION, PLUGIN_INTERFACE_REVISION]
        );
    }

    #[test]
    fn test_instance_export_is_the_global() {
        let exported = get_plugin_instance();
        assert!(!exported.is_null());

        let first = unsafe { &*exported };
        let second = unsafe { &*get_plugin_instance() };
        assert!(std::ptr::eq(first as *const _ as *const u8, second as *const _ as *const u8));

        let plugin = first.lock().unwrap();
        assert_eq!(plugin.info().name, PLUGIN_NAME);
    }
}
