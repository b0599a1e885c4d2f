//! The plugin's view of its host.
//!
//! The host owns the process, hands the plugin its base directory and drives
//! the lifecycle callbacks. The plugin only ever sees it through [`HostApi`].

use std::path::{Path, PathBuf};

/// Services the host exposes to a loaded plugin.
pub trait HostApi {
    /// Base directory of the game installation the host is serving.
    fn base_dir(&self) -> &Path;

    /// Working directory of the host process, used for diagnostics only.
    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    /// Writes a line to the host console.
    fn console_print(&self, message: &str);

    /// Asks the host to deliver level init/shutdown notifications to the
    /// plugin. Until this is called the host sends none.
    fn add_level_listener(&self);
}

/// Arguments of a level-init notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelInit {
    pub map_name: String,
    pub map_entities: String,
    pub old_level: Option<String>,
    pub landmark_name: Option<String>,
    pub load_game: bool,
    pub background: bool,
}

impl LevelInit {
    /// A fresh level load of `map_name` with no previous level.
    pub fn new(map_name: impl Into<String>) -> Self {
        Self {
            map_name: map_name.into(),
            ..Default::default()
        }
    }
}
