//! Headless host for the board demos
//!
//! ```text
//! board_demos [--config host.toml] [--demo cube|platformer] [--frames N] [--snapshot out.png]
//! board_demos --write-config host.ron
//! ```

mod assets;
mod config;
mod error;
mod host;
mod script;

use board_physics::config::Config;
use board_physics::demos::Demo;
use board_physics::foundation::logging;
use board_physics::render::Color;
use clap::{Arg, ArgMatches, Command};

use crate::config::{parse_demo_kind, HostConfig};
use crate::error::DemoError;
use crate::host::Host;

fn cli() -> Command {
    Command::new("board_demos")
        .about("Runs the tilt-cube or platformer demo against a software panel")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML or RON host configuration"),
        )
        .arg(
            Arg::new("demo")
                .short('d')
                .long("demo")
                .value_name("NAME")
                .help("Demo to run: cube or platformer"),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u32))
                .help("Frames to simulate"),
        )
        .arg(
            Arg::new("snapshot")
                .short('o')
                .long("snapshot")
                .value_name("PNG")
                .help("Write the last frame to this file"),
        )
        .arg(
            Arg::new("write-config")
                .long("write-config")
                .value_name("FILE")
                .help("Write the default configuration and exit")
                .conflicts_with_all(["config", "demo", "frames", "snapshot"]),
        )
}

/// Configuration file plus command-line overrides
fn host_config(matches: &ArgMatches) -> Result<HostConfig, DemoError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            log::info!("loading configuration from {path}");
            HostConfig::load_from_file(path)?
        }
        None => HostConfig::default(),
    };

    if let Some(name) = matches.get_one::<String>("demo") {
        config = config.with_demo(parse_demo_kind(name)?);
    }
    if let Some(&frames) = matches.get_one::<u32>("frames") {
        config.frames = frames;
    }
    if let Some(path) = matches.get_one::<String>("snapshot") {
        config.snapshot = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), DemoError> {
    if let Some(path) = matches.get_one::<String>("write-config") {
        HostConfig::default().save_to_file(path)?;
        log::info!("wrote default configuration to {path}");
        return Ok(());
    }

    let mut host = Host::new(host_config(matches)?)?;
    let summary = host.run()?;
    log::info!(
        "{} finished after {} frames ({}), {} edges erased, {} lit pixels left",
        host.demo().name(),
        summary.frames,
        if summary.exited { "exit pressed" } else { "frame budget spent" },
        summary.erased,
        host.panel().count(Color::WHITE)
    );
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    if let Err(e) = logging::init_with_filter("info").map_err(DemoError::from) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&matches) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_physics::demos::DemoKind;

    #[test]
    fn test_cli_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let matches = cli()
            .try_get_matches_from(["board_demos", "--demo", "game", "-n", "30", "-o", "last.png"])
            .unwrap();
        let config = host_config(&matches).unwrap();
        assert_eq!(config.demo, DemoKind::Platformer);
        assert_eq!(config.frames, 30);
        assert_eq!(config.snapshot.as_deref(), Some("last.png"));
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        let matches = cli().try_get_matches_from(["board_demos", "--demo", "scope"]).unwrap();
        assert!(matches!(host_config(&matches), Err(DemoError::Usage(_))));

        let matches = cli().try_get_matches_from(["board_demos", "--frames", "0"]).unwrap();
        assert!(matches!(host_config(&matches), Err(DemoError::Config(_))));

        assert!(cli()
            .try_get_matches_from(["board_demos", "--write-config", "a.ron", "--demo", "cube"])
            .is_err());
    }
}
