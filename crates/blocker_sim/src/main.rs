//! # Blocker Passes Simulator
//!
//! Runs the Blocker Passes plugin against a simulated server and logs what a
//! round start would do: which props are placed where, and what is said in
//! chat.
//!
//! ```bash
//! # Preview a 3 player game on the default configuration
//! blocker-sim --plugin-dir ./BlockerPasses --map de_mirage --players 3
//!
//! # Check an edited configuration file parses and reloads
//! blocker-sim -d ./BlockerPasses --reload --log-level debug
//! ```
//!
//! If the plugin directory has no `blocker_passes.json`, the default one is
//! written there, exactly as the plugin does on a real server.
//!
//! ## Exit Codes
//!
//! * **0**: The round was simulated
//! * **1**: Invalid arguments, logging setup failure, or the plugin failed to load

use plugin_blocker_passes::{BlockerPassesPlugin, CommandCaller, CommandOutcome, RoundReport, SkipReason};
use tracing::{error, info, warn};

mod cli;
mod logging;
mod sim_host;

use cli::CliArgs;
use sim_host::SimHost;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = logging::setup_logging(&args.logging_settings()) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        error!("❌ Simulation failed: {e}");
        std::process::exit(1);
    }
}

/// Loads the plugin and plays one round start.
fn run(args: &CliArgs) -> Result<RoundReport, Box<dyn std::error::Error>> {
    let mut plugin = BlockerPassesPlugin::load(&args.plugin_dir, false)?;
    info!(
        "🔌 {} {} by {} using {}",
        plugin.name(),
        plugin.version(),
        plugin.author(),
        plugin.config_path().display()
    );

    let mut host = SimHost::new(&args.map, args.players, args.spectators);

    if args.reload {
        if let CommandOutcome::Failed(reason) = plugin.on_reload_command(CommandCaller::Console, &mut host) {
            warn!("⚠️ Reload failed, continuing with the loaded configuration: {}", reason);
        }
    }

    info!(
        "🎮 Round start on {} with {} player(s) and {} spectator(s)",
        args.map, args.players, args.spectators
    );
    let report = plugin.handle_round_start(&mut host);
    host.advance_tick();

    match &report {
        RoundReport::Skipped(SkipReason::EnoughPlayers { playing, threshold }) => {
            info!("✅ Passages open: {} playing is above the threshold of {}", playing, threshold);
        }
        RoundReport::Skipped(SkipReason::NoPropsForMap { map }) => {
            info!("✅ Passages open: no blockers configured for {}", map);
        }
        RoundReport::Activated { map, spawned, failed } => {
            let modelled = spawned
                .iter()
                .filter(|entity| host.recorded().entity(**entity).is_some_and(|e| e.model.is_some()))
                .count();
            info!("🚧 {} blocker(s) placed on {}, {} with models", spawned.len(), map, modelled);
            if *failed > 0 {
                warn!("⚠️ {} blocker(s) could not be created", failed);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir, extra: &[&str]) -> CliArgs {
        let dir = dir.path().to_string_lossy().to_string();
        let mut argv = vec!["blocker-sim", "--plugin-dir", dir.as_str()];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_small_game_places_blockers() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir, &["--players", "2", "--spectators", "5"]);

        let report = run(&args).unwrap();
        match report {
            RoundReport::Activated { spawned, failed, .. } => {
                assert_eq!(spawned.len(), 5);
                assert_eq!(failed, 0);
            }
            other => panic!("expected blockers, got {other:?}"),
        }
        assert!(dir.path().join("blocker_passes.json").exists());
    }

    #[test]
    fn test_run_full_game_skips() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir, &["--players", "10", "--reload"]);

        let report = run(&args).unwrap();
        assert!(matches!(report, RoundReport::Skipped(SkipReason::EnoughPlayers { playing: 10, .. })));
    }

    #[test]
    fn test_run_with_broken_config_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("blocker_passes.json"), "[]").unwrap();

        assert!(run(&args_for(&dir, &[])).is_err());
    }
}
