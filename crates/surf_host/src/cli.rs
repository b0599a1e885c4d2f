//! Command-line interface handling for the development host.
//!
//! This module provides command-line argument parsing using the `clap`
//! crate. Every option overrides the matching setting from the host
//! configuration file.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "host.toml";

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the host configuration file
    pub config_path: PathBuf,
    /// Optional override for the game base directory
    pub base_dir: Option<PathBuf>,
    /// Optional plugin library to load instead of the built-in plugin
    pub plugin_path: Option<PathBuf>,
    /// Maps to cycle through; replaces the configured list when non-empty
    pub maps: Vec<String>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Whether to load plugin libraries whose ABI version differs (DANGEROUS)
    pub danger_allow_abi_mismatch: bool,
}

impl CliArgs {
    /// Parses the process arguments.
    ///
    /// Exits the process with clap's usage message on invalid input.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list; the first item is the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn command() -> Command {
        Command::new("cs2-surf development host")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Loads the cs2-surf plugin and drives its lifecycle like a game server would")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Host configuration file path")
                    .default_value(DEFAULT_CONFIG_PATH),
            )
            .arg(
                Arg::new("base-dir")
                    .short('b')
                    .long("base-dir")
                    .value_name("DIR")
                    .help("Game base directory handed to the plugin"),
            )
            .arg(
                Arg::new("plugin")
                    .short('p')
                    .long("plugin")
                    .value_name("LIB")
                    .help("Plugin library to load (defaults to the built-in cs2-surf plugin)"),
            )
            .arg(
                Arg::new("map")
                    .short('m')
                    .long("map")
                    .value_name("NAME")
                    .help("Map to load after the plugin; repeat for several maps")
                    .action(clap::ArgAction::Append),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("danger-allow-abi-mismatch")
                    .long("danger-allow-abi-mismatch")
                    .help("Load plugin libraries built against a different plugin ABI (MAY CAUSE CRASHES)")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            base_dir: matches.get_one::<String>("base-dir").map(PathBuf::from),
            plugin_path: matches.get_one::<String>("plugin").map(PathBuf::from),
            maps: matches
                .get_many::<String>("map")
                .map(|maps| maps.cloned().collect())
                .unwrap_or_default(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            danger_allow_abi_mismatch: matches.get_flag("danger-allow-abi-mismatch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["surf-host"]).unwrap();

        assert_eq!(args.config_path, PathBuf::from("host.toml"));
        assert!(args.base_dir.is_none());
        assert!(args.plugin_path.is_none());
        assert!(args.maps.is_empty());
        assert!(args.log_level.is_none());
        assert!(!args.json_logs);
        assert!(!args.danger_allow_abi_mismatch);
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::try_parse_from([
            "surf-host",
            "--config",
            "dev.toml",
            "--base-dir",
            "/srv/game",
            "-m",
            "surf_utopia_v3",
            "--map",
            "surf_mesa",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        assert_eq!(args.config_path, PathBuf::from("dev.toml"));
        assert_eq!(args.base_dir, Some(PathBuf::from("/srv/game")));
        assert_eq!(args.maps, vec!["surf_utopia_v3", "surf_mesa"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(CliArgs::try_parse_from(["surf-host", "--bind", "0.0.0.0:27015"]).is_err());
    }
}
