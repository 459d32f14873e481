//! Built-in quality recipes

use crate::profile::QualityProfile;
use crate::validator::DEFAULT_PHASE_RESPONSE;
use std::fmt;

/// Passband end used by the low quality recipe (1385/2048, exact in binary)
pub const LOW_QUALITY_PASSBAND_END: f64 = 1385.0 / 2048.0;

const STANDARD_PASSBAND_END: f64 = 0.95;

/// One of the engine's named quality recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    VeryHigh,
    High,
    Medium,
    Low,
    Quick,
}

impl Preset {
    /// Every preset, best quality first
    pub const ALL: [Preset; 5] = [
        Preset::VeryHigh,
        Preset::High,
        Preset::Medium,
        Preset::Low,
        Preset::Quick,
    ];

    /// Name used for this preset in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            Preset::VeryHigh => "very-high",
            Preset::High => "high",
            Preset::Medium => "medium",
            Preset::Low => "low",
            Preset::Quick => "quick",
        }
    }

    /// Bit precision of the preset's filter
    ///
    /// The quick recipe interpolates instead of filtering; it reports the
    /// lowest filter precision and engines key off `QualityProfile::preset`.
    pub const fn precision(self) -> u32 {
        match self {
            Preset::VeryHigh => 28,
            Preset::High => 20,
            Preset::Medium | Preset::Low | Preset::Quick => 16,
        }
    }

    /// Builds the profile for this preset
    ///
    /// Presets leave flag handling to the engine, so no flags are set and no
    /// I/O scaling is ever attached.
    pub fn profile(self) -> QualityProfile {
        let passband_end = match self {
            Preset::Low | Preset::Quick => LOW_QUALITY_PASSBAND_END,
            _ => STANDARD_PASSBAND_END,
        };

        QualityProfile::new(
            Some(self),
            self.precision(),
            DEFAULT_PHASE_RESPONSE as f64,
            passband_end,
            1.0,
            0,
        )
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
