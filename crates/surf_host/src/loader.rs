//! Plugin library loading.
//!
//! A plugin either comes from a dynamic library on disk or is the built-in
//! cs2-surf instance linked into the host. Either way the host ends up with
//! a `&Mutex<dyn Plugin>` that stays valid for as long as the handle lives.

use crate::error::HostError;
use libloading::{Library, Symbol};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use surf_plugin::{Plugin, PLUGIN_ABI_VERSION};
use tracing::{info, warn};

type AbiVersionFn = extern "C" fn() -> *const c_char;
#[allow(improper_ctypes_definitions)]
type InstanceFn = extern "C" fn() -> *const Mutex<dyn Plugin>;

/// A plugin instance obtained from a dynamic library.
pub struct PluginLibrary {
    path: PathBuf,
    instance: *const Mutex<dyn Plugin>,
    // Must outlive `instance`, which points into the library's statics
    _library: Library,
}

impl PluginLibrary {
    /// Loads a plugin library and fetches its exported instance.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the plugin library file
    /// * `allow_abi_mismatch` - Load even when the plugin reports a different
    ///   ABI version than the host expects
    pub fn open(path: &Path, allow_abi_mismatch: bool) -> Result<Self, HostError> {
        info!("🔄 Loading plugin library from: {}", path.display());

        let library = unsafe {
            Library::new(path).map_err(|e| {
                HostError::LibraryError(format!("Failed to load library: {}", e))
            })?
        };

        let plugin_version = {
            let get_version: Symbol<AbiVersionFn> = unsafe {
                library.get(b"get_plugin_abi_version").map_err(|e| {
                    HostError::LibraryError(format!(
                        "Plugin does not export 'get_plugin_abi_version' function: {}",
                        e
                    ))
                })?
            };

            let version_ptr = get_version();
            if version_ptr.is_null() {
                return Err(HostError::LibraryError(
                    "Plugin returned null version string".to_string(),
                ));
            }
            unsafe { CStr::from_ptr(version_ptr) }.to_string_lossy().into_owned()
        };

        check_abi_version(&plugin_version, allow_abi_mismatch)?;

        let instance = {
            let get_instance: Symbol<InstanceFn> = unsafe {
                library.get(b"get_plugin_instance").map_err(|e| {
                    HostError::LibraryError(format!(
                        "Plugin does not export 'get_plugin_instance' function: {}",
                        e
                    ))
                })?
            };
            get_instance()
        };

        if instance.is_null() {
            return Err(HostError::LibraryError(
                "Plugin instance function returned null".to_string(),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            instance,
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn plugin(&self) -> &Mutex<dyn Plugin> {
        // Non-null was checked in `open`, and the library is still loaded
        unsafe { &*self.instance }
    }
}

/// Compares a plugin's ABI version against the host's.
pub fn check_abi_version(plugin_version: &str, allow_abi_mismatch: bool) -> Result<(), HostError> {
    if plugin_version == PLUGIN_ABI_VERSION {
        return Ok(());
    }

    if allow_abi_mismatch {
        warn!(
            "⚠️ Loading plugin with ABI {} into host ABI {} (--danger-allow-abi-mismatch)",
            plugin_version, PLUGIN_ABI_VERSION
        );
        return Ok(());
    }

    Err(HostError::AbiMismatch {
        plugin: plugin_version.to_string(),
        host: PLUGIN_ABI_VERSION.to_string(),
    })
}

/// Where the host's plugin instance comes from.
pub enum PluginHandle {
    /// The cs2-surf plugin linked into the host
    Builtin(&'static Mutex<dyn Plugin>),
    /// A plugin loaded from a dynamic library
    Library(PluginLibrary),
}

impl PluginHandle {
    pub fn builtin() -> Self {
        let concrete: &'static Mutex<surf_plugin::SurfPlugin> = &surf_plugin::SURF_PLUGIN;
        let instance: &'static Mutex<dyn Plugin> = concrete;
        PluginHandle::Builtin(instance)
    }

    /// Opens `path` when given, otherwise uses the built-in plugin.
    pub fn open(path: Option<&Path>, allow_abi_mismatch: bool) -> Result<Self, HostError> {
        match path {
            Some(path) => Ok(PluginHandle::Library(PluginLibrary::open(path, allow_abi_mismatch)?)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn plugin(&self) -> &Mutex<dyn Plugin> {
        match self {
            PluginHandle::Builtin(instance) => *instance,
            PluginHandle::Library(library) => library.plugin(),
        }
    }
}
