//! Command-line interface for the dry-run simulator.
//!
//! Arguments are parsed with `clap` and describe the round to simulate: which
//! plugin directory to load, which map is running and how many players are
//! connected.

use crate::logging::LoggingSettings;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Upper bound for simulated player and spectator counts, a full server.
pub const MAX_SIMULATED_PLAYERS: u32 = 64;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Module directory holding `blocker_passes.json`
    pub plugin_dir: PathBuf,
    /// Map reported by the simulated server
    pub map: String,
    /// Players on a playing team
    pub players: u32,
    /// Connected spectators, never counted towards the threshold
    pub spectators: u32,
    /// Run `css_bp_reload` from the console before the round starts
    pub reload: bool,
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether to output logs in JSON format
    pub json_logs: bool,
}

impl CliArgs {
    /// Builds the clap command definition.
    pub fn command() -> Command {
        Command::new("Blocker Passes Simulator")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Previews what Blocker Passes does at round start for a map and player count")
            .arg(
                Arg::new("plugin-dir")
                    .short('d')
                    .long("plugin-dir")
                    .value_name("DIR")
                    .help("Plugin module directory containing blocker_passes.json")
                    .default_value("."),
            )
            .arg(
                Arg::new("map")
                    .short('m')
                    .long("map")
                    .value_name("NAME")
                    .help("Map name reported by the server")
                    .default_value("de_mirage"),
            )
            .arg(
                Arg::new("players")
                    .short('p')
                    .long("players")
                    .value_name("COUNT")
                    .help("Players on a playing team")
                    .value_parser(clap::value_parser!(u32).range(0..=MAX_SIMULATED_PLAYERS as i64))
                    .default_value("0"),
            )
            .arg(
                Arg::new("spectators")
                    .short('s')
                    .long("spectators")
                    .value_name("COUNT")
                    .help("Connected spectators")
                    .value_parser(clap::value_parser!(u32).range(0..=MAX_SIMULATED_PLAYERS as i64))
                    .default_value("0"),
            )
            .arg(
                Arg::new("reload")
                    .long("reload")
                    .help("Run css_bp_reload from the server console before the round")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)")
                    .default_value("info"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    /// Parses the process arguments.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list, e.g. in tests.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        // Every argument except the flags carries a default value.
        let string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
        let count = |id: &str| matches.get_one::<u32>(id).copied().unwrap_or_default();

        Self {
            plugin_dir: PathBuf::from(string("plugin-dir")),
            map: string("map"),
            players: count("players"),
            spectators: count("spectators"),
            reload: matches.get_flag("reload"),
            log_level: string("log-level"),
            json_logs: matches.get_flag("json-logs"),
        }
    }

    pub fn logging_settings(&self) -> LoggingSettings {
        LoggingSettings {
            level: self.log_level.clone(),
            json_format: self.json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["blocker-sim"]).unwrap();

        assert_eq!(args.plugin_dir, PathBuf::from("."));
        assert_eq!(args.map, "de_mirage");
        assert_eq!(args.players, 0);
        assert_eq!(args.spectators, 0);
        assert!(!args.reload);
        assert_eq!(args.log_level, "info");
        assert!(!args.json_logs);
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::try_parse_from([
            "blocker-sim", "-d", "/srv/plugins/BlockerPasses", "--map", "de_nuke", "-p", "4", "--spectators",
            "2", "--reload", "--log-level", "debug", "--json-logs",
        ])
        .unwrap();

        assert_eq!(args.plugin_dir, PathBuf::from("/srv/plugins/BlockerPasses"));
        assert_eq!(args.map, "de_nuke");
        assert_eq!(args.players, 4);
        assert_eq!(args.spectators, 2);
        assert!(args.reload);

        let logging = args.logging_settings();
        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
    }

    #[test]
    fn test_rejects_counts_above_server_size() {
        assert!(CliArgs::try_parse_from(["blocker-sim", "--players", "65"]).is_err());
        assert!(CliArgs::try_parse_from(["blocker-sim", "--spectators", "4294967295"]).is_err());

        let args = CliArgs::try_parse_from(["blocker-sim", "-p", "64", "-s", "64"]).unwrap();
        assert_eq!(args.players, MAX_SIMULATED_PLAYERS);
        assert_eq!(args.spectators, MAX_SIMULATED_PLAYERS);
    }

    #[test]
    fn test_rejects_non_numeric_player_count() {
        assert!(CliArgs::try_parse_from(["blocker-sim", "--players", "many"]).is_err());
    }
}
