// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use clap::ArgMatches;
use console::style;
use resampler_config::{
    open_session, recipe_names, ConfigManager, Preset, ResamplerEngine, ResolvedProfile,
    SessionParams, CUSTOM_RECIPE,
};

/// Resolve the config file and print the profile
pub fn check(manager: &ConfigManager) -> Result<()> {
    let profile = manager.load().with_context(|| {
        format!(
            "Invalid resampler config at {}",
            manager.config_path().display()
        )
    })?;

    println!("{} {}", style("✓").green().bold(), manager.config_path().display());
    for line in describe_profile(&profile) {
        println!("  {}", line);
    }
    Ok(())
}

/// Resolve the config file and open a session against the dry-run engine
pub fn open(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    let input_rate = *matches
        .get_one::<u32>("input-rate")
        .ok_or_else(|| anyhow::anyhow!("Input rate is required"))?;
    let output_rate = *matches
        .get_one::<u32>("output-rate")
        .ok_or_else(|| anyhow::anyhow!("Output rate is required"))?;
    let channels = *matches
        .get_one::<u32>("channels")
        .ok_or_else(|| anyhow::anyhow!("Channel count is required"))?;

    log::debug!(
        "Opening dry-run session {} Hz -> {} Hz, {} channels",
        input_rate,
        output_rate,
        channels
    );
    let profile = manager.load().context("Failed to resolve resampler config")?;
    let session = open_session(&DryRunEngine, &profile, input_rate, output_rate, channels)
        .context("Failed to open resampler session")?;

    println!("{} {}", style("Session").bold().cyan(), session);
    Ok(())
}

/// List every accepted quality name
pub fn list_presets() -> Result<()> {
    println!("{}", style("Quality recipes").bold().cyan());
    println!("{}", "=".repeat(60));

    for name in recipe_names() {
        match Preset::ALL.iter().find(|p| p.name() == name) {
            Some(preset) => println!("{:<10} {}", style(name).bold(), preset.profile()),
            None => println!(
                "{:<10} user-defined precision, phase, band edges, attenuation and flags",
                style(name).bold()
            ),
        }
    }
    Ok(())
}

/// Write the default template unless a config file already exists
pub fn init(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default resampler config")?;

    if created {
        println!(
            "{} Created {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Config already exists at {}",
            manager.config_path().display()
        );
    }
    Ok(())
}

/// Human-readable lines describing a resolved profile
pub fn describe_profile(profile: &ResolvedProfile) -> Vec<String> {
    let quality = profile.quality();
    let mut lines = vec![
        format!("recipe:         {}", profile.recipe()),
        format!("precision:      {} bit", quality.precision()),
        format!("phase_response: {:.2}", quality.phase_response()),
        format!("passband_end:   {:.4}", quality.passband_end()),
        format!("stopband_begin: {:.4}", quality.stopband_begin()),
        format!("flags:          {:#x}", quality.flags()),
    ];

    match profile.scaling() {
        Some(scaling) => lines.push(format!("scale:          {:.5}", scaling.scale())),
        None if profile.recipe() == CUSTOM_RECIPE => {
            lines.push("scale:          engine default".to_string())
        }
        None => {}
    }
    lines
}

/// Engine stand-in that checks the session parameters and describes them
pub struct DryRunEngine;

impl ResamplerEngine for DryRunEngine {
    type Session = String;

    fn create(&self, params: &SessionParams<'_>) -> Result<String, String> {
        if params.input_rate == 0 || params.output_rate == 0 {
            return Err("sample rates must be non-zero".to_string());
        }
        if params.channels == 0 {
            return Err("channel count must be non-zero".to_string());
        }

        Ok(format!(
            "{} Hz -> {} Hz, {} channel(s), {}",
            params.input_rate, params.output_rate, params.channels, params.quality
        ))
    }
}
