//! Hands a resolved profile to a resampling engine

use crate::error::{RecipeError, RecipeResult};
use crate::profile::{QualityProfile, ResolvedProfile, ScalingSpec};

/// Everything an engine needs to build one resampling session
#[derive(Debug, Clone, Copy)]
pub struct SessionParams<'a> {
    pub input_rate: u32,
    pub output_rate: u32,
    pub channels: u32,
    pub quality: &'a QualityProfile,
    /// `None` means the engine's default I/O scaling
    pub scaling: Option<&'a ScalingSpec>,
}

/// A sample-rate converter that builds sessions from a quality profile
///
/// Implementations report rejection with their own diagnostic text.
pub trait ResamplerEngine {
    type Session;

    fn create(&self, params: &SessionParams<'_>) -> Result<Self::Session, String>;
}

/// Opens a session for the given rates using the shared profile
pub fn open_session<E: ResamplerEngine>(
    engine: &E,
    profile: &ResolvedProfile,
    input_rate: u32,
    output_rate: u32,
    channels: u32,
) -> RecipeResult<E::Session> {
    let quality = profile.quality();

    log::info!(
        target: "soxr",
        "soxr precision={}, phase_response={:.2}, passband_end={:.2}, stopband_begin={:.2} scale={:.2}, flags={:#x}",
        quality.precision(),
        quality.phase_response(),
        quality.passband_end(),
        quality.stopband_begin(),
        profile.scale(),
        quality.flags()
    );

    let params = SessionParams {
        input_rate,
        output_rate,
        channels,
        quality,
        scaling: profile.scaling(),
    };

    engine
        .create(&params)
        .map_err(|message| RecipeError::EngineInitFailure { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ResamplerBlock;
    use crate::resolver::resolve;

    struct RecordingEngine;

    impl ResamplerEngine for RecordingEngine {
        type Session = (u32, u32, u32, QualityProfile, Option<f64>);

        fn create(&self, params: &SessionParams<'_>) -> Result<Self::Session, String> {
            Ok((
                params.input_rate,
                params.output_rate,
                params.channels,
                *params.quality,
                params.scaling.map(|s| s.scale()),
            ))
        }
    }

    struct RejectingEngine;

    impl ResamplerEngine for RejectingEngine {
        type Session = ();

        fn create(&self, _params: &SessionParams<'_>) -> Result<(), String> {
            Err("invalid io rate".to_string())
        }
    }

    #[test]
    fn test_profile_passed_through() {
        let profile = resolve(&ResamplerBlock::new("custom").with_attenuation("3"))
            .expect("valid block");
        let (input, output, channels, quality, scale) =
            open_session(&RecordingEngine, &profile, 44_100, 48_000, 2).expect("engine accepts");

        assert_eq!((input, output, channels), (44_100, 48_000, 2));
        assert_eq!(&quality, profile.quality());
        assert_eq!(scale, Some(profile.scale()));
    }

    #[test]
    fn test_preset_passes_no_scaling() {
        let profile = resolve(&ResamplerBlock::new("medium")).expect("valid block");
        let (_, _, _, _, scale) =
            open_session(&RecordingEngine, &profile, 48_000, 96_000, 1).expect("engine accepts");
        assert_eq!(scale, None);
    }

    #[test]
    fn test_engine_message_surfaced() {
        let profile = resolve(&ResamplerBlock::new("quick")).expect("valid block");
        let err = open_session(&RejectingEngine, &profile, 0, 48_000, 2).unwrap_err();
        assert_eq!(
            err,
            RecipeError::EngineInitFailure {
                message: "invalid io rate".to_string()
            }
        );
    }
}
