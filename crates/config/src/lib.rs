//! Resampler quality configuration
//!
//! Turns the textual `[resampler]` settings into a validated, immutable
//! [`QualityProfile`] (plus an optional [`ScalingSpec`]) that a sample-rate
//! converter can use without further checks.
//!
//! # Architecture
//!
//! - **Selection**: the `quality` name picks a built-in preset or a custom recipe
//! - **Validation**: custom recipes parse five numeric keys, each with its own domain
//! - **Fail fast**: the first invalid value aborts the load, with its file and line
//! - **Shared profile**: one resolved profile per configuration, read by every session
//!
//! # Example
//!
//! ```rust
//! use resampler_config::{resolve, ResamplerBlock};
//!
//! let block = ResamplerBlock::new("custom")
//!     .with_precision(24)
//!     .with_passband_end("90")
//!     .with_attenuation("3");
//! let profile = resolve(&block).expect("valid recipe");
//!
//! assert_eq!(profile.quality().precision(), 24);
//! assert_eq!(profile.quality().passband_end(), 0.9);
//! assert!(profile.scaling().is_some());
//! ```

mod block;
mod error;
mod manager;
mod number;
mod preset;
mod profile;
mod recipe;
mod resolver;
mod session;
mod validator;

pub mod watcher;

pub use block::{ResamplerBlock, Setting};
pub use error::{ConfigError, ConfigLocation, ConfigResult, RecipeError, RecipeResult};
pub use manager::{ConfigManager, CONFIG_FILE_NAME, DEFAULT_PRESET, DEFAULT_TEMPLATE};
pub use number::parse_number;
pub use preset::Preset;
pub use profile::{
    QualityProfile, ResolvedProfile, SampleFormat, ScalingSpec, FLAGS_MASK, NO_SCALING,
    RESET_ON_CLEAR_FLAG,
};
pub use recipe::{recipe_names, select_recipe, RecipeSelection, CUSTOM_RECIPE};
pub use resolver::{resolve, resolve_str, resolve_toml};
pub use session::{open_session, ResamplerEngine, SessionParams};
pub use validator::{
    combine_flags, parse_attenuation, parse_passband_end, parse_phase_response, parse_precision,
    parse_stopband_begin, resolve_custom, DEFAULT_ATTENUATION, DEFAULT_FLAGS,
    DEFAULT_PASSBAND_END, DEFAULT_PHASE_RESPONSE, DEFAULT_PRECISION, DEFAULT_STOPBAND_BEGIN,
    VALID_PRECISIONS,
};
