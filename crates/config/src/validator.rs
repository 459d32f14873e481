//! Custom recipe validation
//!
//! Each field has its own parser. Fields are independent of each other; they
//! are parsed in a fixed order so the first error reported is reproducible:
//! precision, phase_response, passband_end, stopband_begin, flags, attenuation.

use crate::block::{ResamplerBlock, Setting};
use crate::error::{ConfigLocation, RecipeError, RecipeResult};
use crate::number::{in_range, parse_number};
use crate::preset::Preset;
use crate::profile::{QualityProfile, ScalingSpec, FLAGS_MASK, RESET_ON_CLEAR_FLAG};

/// Precisions the engine can build filters for
pub const VALID_PRECISIONS: [i64; 5] = [16, 20, 24, 28, 32];

pub const DEFAULT_PRECISION: i64 = Preset::VeryHigh.precision() as i64;
pub const DEFAULT_PHASE_RESPONSE: i64 = 50;
pub const DEFAULT_PASSBAND_END: &str = "95.0";
pub const DEFAULT_STOPBAND_BEGIN: &str = "100.0";
pub const DEFAULT_ATTENUATION: &str = "0";
pub const DEFAULT_FLAGS: u64 = 0;

/// Validates a bit precision
pub fn parse_precision(value: i64, location: &ConfigLocation) -> RecipeResult<u32> {
    if !VALID_PRECISIONS.contains(&value) {
        return Err(RecipeError::InvalidPrecision {
            value,
            location: location.clone(),
        });
    }

    // Every valid precision fits in u32
    Ok(value as u32)
}

/// Validates a phase response, 0 to 100
pub fn parse_phase_response(value: i64, location: &ConfigLocation) -> RecipeResult<f64> {
    if !in_range(value, 0, 100) {
        return Err(RecipeError::InvalidPhaseResponse {
            value,
            location: location.clone(),
        });
    }

    Ok(value as f64)
}

/// Parses a passband end percentage (1 to 100) into a fraction
pub fn parse_passband_end(text: &str, location: &ConfigLocation) -> RecipeResult<f64> {
    let percent = parse_number("passband_end", text, location)?;
    if !in_range(percent, 1.0, 100.0) {
        return Err(RecipeError::InvalidPassbandEnd {
            value: text.to_string(),
            location: location.clone(),
        });
    }

    Ok(percent / 100.0)
}

/// Parses a stopband begin percentage (100 to 150) into a fraction
pub fn parse_stopband_begin(text: &str, location: &ConfigLocation) -> RecipeResult<f64> {
    let percent = parse_number("stopband_begin", text, location)?;
    if !in_range(percent, 100.0, 150.0) {
        return Err(RecipeError::InvalidStopbandBegin {
            value: text.to_string(),
            location: location.clone(),
        });
    }

    Ok(percent / 100.0)
}

/// Parses an attenuation in decibels (0 to 30) into an optional I/O scaling
///
/// Returns `None` for zero attenuation.
pub fn parse_attenuation(
    text: &str,
    location: &ConfigLocation,
) -> RecipeResult<Option<ScalingSpec>> {
    let decibels = parse_number("attenuation", text, location)?;
    if !in_range(decibels, 0.0, 30.0) {
        return Err(RecipeError::InvalidAttenuation {
            value: text.to_string(),
            location: location.clone(),
        });
    }

    Ok(ScalingSpec::from_attenuation(decibels))
}

/// Masks user flags to their low six bits and sets the reset-on-clear bit
///
/// Bits above the mask are dropped rather than rejected.
pub fn combine_flags(value: u64) -> u32 {
    let masked = (value & u64::from(FLAGS_MASK)) as u32;
    if u64::from(masked) != value {
        log::warn!(
            target: "soxr",
            "flags {:#x} has bits outside {:#x}, using {:#x}",
            value,
            FLAGS_MASK,
            masked
        );
    }

    masked | RESET_ON_CLEAR_FLAG
}

/// Builds a custom profile and its optional scaling from a block
pub fn resolve_custom(
    block: &ResamplerBlock,
) -> RecipeResult<(QualityProfile, Option<ScalingSpec>)> {
    let precision = parse_precision(
        value_or(&block.precision, DEFAULT_PRECISION, "precision"),
        &block.location_of(&block.precision),
    )?;

    let phase_response = parse_phase_response(
        value_or(
            &block.phase_response,
            DEFAULT_PHASE_RESPONSE,
            "phase_response",
        ),
        &block.location_of(&block.phase_response),
    )?;

    let passband_end = parse_passband_end(
        text_or(&block.passband_end, DEFAULT_PASSBAND_END, "passband_end"),
        &block.location_of(&block.passband_end),
    )?;

    let stopband_begin = parse_stopband_begin(
        text_or(
            &block.stopband_begin,
            DEFAULT_STOPBAND_BEGIN,
            "stopband_begin",
        ),
        &block.location_of(&block.stopband_begin),
    )?;

    let flags = combine_flags(value_or(&block.flags, DEFAULT_FLAGS, "flags"));

    let scaling = parse_attenuation(
        text_or(&block.attenuation, DEFAULT_ATTENUATION, "attenuation"),
        &block.location_of(&block.attenuation),
    )?;

    let profile = QualityProfile::new(
        None,
        precision,
        phase_response,
        passband_end,
        stopband_begin,
        flags,
    );

    Ok((profile, scaling))
}

fn value_or<T: Copy + std::fmt::Debug>(
    setting: &Option<Setting<T>>,
    default: T,
    field: &str,
) -> T {
    match setting {
        Some(s) => s.value,
        None => {
            log::debug!(target: "soxr", "{} not set, using {:?}", field, default);
            default
        }
    }
}

fn text_or<'a>(setting: &'a Option<Setting<String>>, default: &'a str, field: &str) -> &'a str {
    match setting {
        Some(s) => s.value.as_str(),
        None => {
            log::debug!(target: "soxr", "{} not set, using {:?}", field, default);
            default
        }
    }
}
