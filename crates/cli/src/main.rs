// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use resampler_config::ConfigManager;
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("resampler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve and inspect resampler quality settings")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the resampler config file (defaults to the user config directory)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("check").about("Resolve the config and print the quality profile"))
        .subcommand(
            Command::new("open")
                .about("Resolve the config and open a dry-run resampler session")
                .arg(
                    Arg::new("input-rate")
                        .long("input-rate")
                        .value_name("HZ")
                        .help("Input sample rate")
                        .value_parser(value_parser!(u32))
                        .default_value("44100"),
                )
                .arg(
                    Arg::new("output-rate")
                        .long("output-rate")
                        .value_name("HZ")
                        .help("Output sample rate")
                        .value_parser(value_parser!(u32))
                        .default_value("48000"),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .value_name("COUNT")
                        .help("Channel count")
                        .value_parser(value_parser!(u32))
                        .default_value("2"),
                ),
        )
        .subcommand(Command::new("presets").about("List the built-in quality recipes"))
        .subcommand(Command::new("init").about("Write a commented default config file"))
}

fn config_manager(path: Option<&PathBuf>) -> Result<ConfigManager> {
    match path {
        Some(path) => Ok(ConfigManager::with_path(path.clone())),
        None => ConfigManager::new().context("Failed to locate the config directory"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();
    let manager = config_manager(matches.get_one::<PathBuf>("config"))?;
    log::debug!("Using resampler config at {}", manager.config_path().display());

    match matches.subcommand() {
        Some(("check", _)) => commands::check(&manager),
        Some(("open", sub_matches)) => commands::open(&manager, sub_matches),
        Some(("presets", _)) => commands::list_presets(),
        Some(("init", _)) => commands::init(&manager),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_open_defaults() {
        let matches = build_cli()
            .try_get_matches_from(["resampler", "open"])
            .expect("should parse");
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "open");
        assert_eq!(sub.get_one::<u32>("input-rate"), Some(&44_100));
        assert_eq!(sub.get_one::<u32>("output-rate"), Some(&48_000));
        assert_eq!(sub.get_one::<u32>("channels"), Some(&2));
    }

    #[test]
    fn test_global_config_path() {
        let matches = build_cli()
            .try_get_matches_from(["resampler", "check", "--config", "/tmp/r.toml"])
            .expect("should parse");
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("/tmp/r.toml"))
        );
    }

    #[test]
    fn test_rejects_non_numeric_rate() {
        let result = build_cli().try_get_matches_from(["resampler", "open", "--input-rate", "fast"]);
        assert!(result.is_err());
    }
}
