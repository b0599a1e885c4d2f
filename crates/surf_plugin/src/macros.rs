//! Export macro for plugin libraries.

/// Declares the process-wide plugin instance and the symbols a host looks up
/// when it loads the library.
///
/// Generates:
///
/// * `$instance` - a lazily constructed `Mutex<$plugin_type>` static
/// * `get_plugin_abi_version` - returns [`PLUGIN_ABI_VERSION`](crate::PLUGIN_ABI_VERSION)
///   as a nul-terminated C string
/// * `get_plugin_instance` - returns a pointer to the instance as
///   `Mutex<dyn Plugin>`, or null if constructing it panicked
///
/// The instance lives for the lifetime of the process; the host never frees it.
///
/// ```rust,ignore
/// surf_plugin::expose_plugin!(MyPlugin, MY_PLUGIN);
/// ```
#[macro_export]
macro_rules! expose_plugin {
    ($plugin_type:ty, $instance:ident) => {
        /// Process-wide plugin instance handed to the host.
        pub static $instance: $crate::__private::Lazy<std::sync::Mutex<$plugin_type>> =
            $crate::__private::Lazy::new(|| std::sync::Mutex::new(<$plugin_type>::new()));

        /// Plugin ABI version - required export for compatibility checks.
        #[no_mangle]
        pub extern "C" fn get_plugin_abi_version() -> *const std::os::raw::c_char {
            $crate::__private::PLUGIN_ABI_VERSION_NUL.as_ptr() as *const std::os::raw::c_char
        }

        /// Plugin instance accessor with panic protection - required export.
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn get_plugin_instance() -> *const std::sync::Mutex<dyn $crate::Plugin> {
            // Panics must not unwind across the library boundary
            match std::panic::catch_unwind(|| {
                let concrete: &'static std::sync::Mutex<$plugin_type> =
                    $crate::__private::Lazy::force(&$instance);
                let instance: &'static std::sync::Mutex<dyn $crate::Plugin> = concrete;
                instance as *const std::sync::Mutex<dyn $crate::Plugin>
            }) {
                Ok(instance) => instance,
                Err(panic_info) => {
                    $crate::__private::tracing::error!(
                        "{}",
                        $crate::PluginError::from_panic(panic_info)
                    );
                    std::ptr::null::<std::sync::Mutex<$plugin_type>>()
                        as *const std::sync::Mutex<dyn $crate::Plugin>
                }
            }
        }
    };
}
