//! Resolved, engine-ready quality description

use crate::preset::Preset;
use std::fmt;

/// Mask applied to user-supplied flags
pub const FLAGS_MASK: u32 = 0x3f;

/// Lets the engine clear a session mid-stream without rebuilding its filters
///
/// Always set on custom profiles, never on presets.
pub const RESET_ON_CLEAR_FLAG: u32 = 1 << 31;

/// Scale value meaning "no extra attenuation"
pub const NO_SCALING: f64 = 1.0;

/// Resampling precision and filter shape
///
/// Only the resolver constructs these, so every field is already within its
/// domain. `passband_end` and `stopband_begin` are both fractions of Nyquist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    preset: Option<Preset>,
    precision: u32,
    phase_response: f64,
    passband_end: f64,
    stopband_begin: f64,
    flags: u32,
}

impl QualityProfile {
    pub(crate) fn new(
        preset: Option<Preset>,
        precision: u32,
        phase_response: f64,
        passband_end: f64,
        stopband_begin: f64,
        flags: u32,
    ) -> Self {
        Self {
            preset,
            precision,
            phase_response,
            passband_end,
            stopband_begin,
            flags,
        }
    }

    /// The built-in recipe this profile came from, `None` for custom recipes
    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Whether this profile was built from a custom recipe
    pub fn is_custom(&self) -> bool {
        self.preset.is_none()
    }

    /// Bit depth, one of 16, 20, 24, 28 or 32
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Phase response blend, 0 to 100
    pub fn phase_response(&self) -> f64 {
        self.phase_response
    }

    /// End of the flat-response band as a fraction, in (0, 1]
    pub fn passband_end(&self) -> f64 {
        self.passband_end
    }

    /// Start of the attenuation band as a fraction, in [1, 1.5]
    pub fn stopband_begin(&self) -> f64 {
        self.stopband_begin
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "precision={}, phase_response={:.2}, passband_end={:.4}, stopband_begin={:.4}, flags={:#x}",
            self.precision, self.phase_response, self.passband_end, self.stopband_begin, self.flags
        )
    }
}

/// Sample representation at the engine's input and output boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Float32,
}

/// Extra gain applied by the engine at its I/O boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingSpec {
    input: SampleFormat,
    output: SampleFormat,
    scale: f64,
}

impl ScalingSpec {
    /// Converts a decibel attenuation into a linear scale factor
    ///
    /// Returns `None` when the result is the "no scaling" value, meaning the
    /// engine should use its default I/O handling.
    pub(crate) fn from_attenuation(decibels: f64) -> Option<Self> {
        let scale = 10f64.powf(-decibels / 10.0);
        if scale == NO_SCALING {
            return None;
        }

        Some(Self {
            input: SampleFormat::Float32,
            output: SampleFormat::Float32,
            scale,
        })
    }

    /// Linear gain factor in (0, 1]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn input(&self) -> SampleFormat {
        self.input
    }

    pub fn output(&self) -> SampleFormat {
        self.output
    }
}

/// Outcome of a successful resolution
///
/// One instance exists per loaded configuration. It is shared read-only with
/// every session opened afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    recipe: &'static str,
    quality: QualityProfile,
    scaling: Option<ScalingSpec>,
}

impl ResolvedProfile {
    pub(crate) fn new(
        recipe: &'static str,
        quality: QualityProfile,
        scaling: Option<ScalingSpec>,
    ) -> Self {
        Self {
            recipe,
            quality,
            scaling,
        }
    }

    /// Name of the selected recipe as written in the configuration
    pub fn recipe(&self) -> &'static str {
        self.recipe
    }

    pub fn quality(&self) -> &QualityProfile {
        &self.quality
    }

    /// I/O scaling, absent when the engine default applies
    pub fn scaling(&self) -> Option<&ScalingSpec> {
        self.scaling.as_ref()
    }

    /// Effective scale factor, `NO_SCALING` when no scaling spec is present
    pub fn scale(&self) -> f64 {
        self.scaling.map_or(NO_SCALING, |s| s.scale())
    }
}

impl fmt::Display for ResolvedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, scale={:.5}", self.recipe, self.quality, self.scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_attenuation_means_no_scaling() {
        assert!(ScalingSpec::from_attenuation(0.0).is_none());
    }

    #[test]
    fn test_attenuation_to_linear_scale() {
        let spec = ScalingSpec::from_attenuation(3.0).expect("3 dB should scale");
        assert!((spec.scale() - 10f64.powf(-0.3)).abs() < 1e-12);
        assert!((spec.scale() - 0.50119).abs() < 1e-5);
        assert_eq!(spec.input(), SampleFormat::Float32);
        assert_eq!(spec.output(), SampleFormat::Float32);
    }

    #[test]
    fn test_resolved_scale_defaults_to_one() {
        let quality = QualityProfile::new(None, 24, 50.0, 0.95, 1.0, RESET_ON_CLEAR_FLAG);
        let resolved = ResolvedProfile::new("custom", quality, None);
        assert_eq!(resolved.scale(), NO_SCALING);
        assert!(resolved.scaling().is_none());
        assert!(resolved.quality().is_custom());
    }

    #[test]
    fn test_profile_display_lists_every_field() {
        let quality = QualityProfile::new(None, 24, 50.0, 0.95, 1.0, RESET_ON_CLEAR_FLAG | 1);
        let text = quality.to_string();
        assert!(text.contains("precision=24"));
        assert!(text.contains("phase_response=50.00"));
        assert!(text.contains("passband_end=0.9500"));
        assert!(text.contains("stopband_begin=1.0000"));
        assert!(text.contains("flags=0x80000001"));
    }
}
