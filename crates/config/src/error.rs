//! Error types for recipe resolution and configuration loading

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for recipe resolution
pub type RecipeResult<T> = Result<T, RecipeError>;

/// Result type for configuration file operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where a configuration value came from
///
/// Both parts are optional: values built in code have neither, values parsed
/// from an in-memory string have only a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Source file, if the configuration was read from disk
    pub path: Option<PathBuf>,

    /// 1-based line of the offending entry
    pub line: Option<usize>,
}

impl ConfigLocation {
    /// A location with neither file nor line
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A location at `line` of an optional file
    pub fn at_line(path: Option<&Path>, line: usize) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            line: Some(line),
        }
    }
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, "{}:{}", path.display(), line),
            (Some(path), None) => write!(f, "{}", path.display()),
            (None, Some(line)) => write!(f, "line {}", line),
            (None, None) => write!(f, "resampler block"),
        }
    }
}

/// Errors produced while turning a resampler block into a quality profile
///
/// Every configuration-sourced variant names the offending value and where it
/// was written. None of these are recoverable: the load must be aborted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    #[error("{location}: unknown resampler quality \"{value}\"")]
    UnknownRecipe {
        value: String,
        location: ConfigLocation,
    },

    #[error("{location}: invalid precision {value}, must be one of 16, 20, 24, 28 or 32")]
    InvalidPrecision {
        value: i64,
        location: ConfigLocation,
    },

    #[error("{location}: phase_response {value} is out of range, must be between 0 and 100")]
    InvalidPhaseResponse {
        value: i64,
        location: ConfigLocation,
    },

    #[error("{location}: passband_end \"{value}\" is out of range, must be between 1 and 100")]
    InvalidPassbandEnd {
        value: String,
        location: ConfigLocation,
    },

    #[error(
        "{location}: stopband_begin \"{value}\" is out of range, must be between 100 and 150"
    )]
    InvalidStopbandBegin {
        value: String,
        location: ConfigLocation,
    },

    #[error("{location}: attenuation \"{value}\" is out of range, must be between 0 and 30")]
    InvalidAttenuation {
        value: String,
        location: ConfigLocation,
    },

    #[error("{location}: {field} \"{value}\" is not a number")]
    MalformedNumber {
        field: &'static str,
        value: String,
        location: ConfigLocation,
    },

    /// The engine refused to build a session from an otherwise valid profile
    #[error("soxr initialization failed: {message}")]
    EngineInitFailure { message: String },
}

impl RecipeError {
    /// Name of the configuration key this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            RecipeError::UnknownRecipe { .. } => "quality",
            RecipeError::InvalidPrecision { .. } => "precision",
            RecipeError::InvalidPhaseResponse { .. } => "phase_response",
            RecipeError::InvalidPassbandEnd { .. } => "passband_end",
            RecipeError::InvalidStopbandBegin { .. } => "stopband_begin",
            RecipeError::InvalidAttenuation { .. } => "attenuation",
            RecipeError::MalformedNumber { field, .. } => *field,
            RecipeError::EngineInitFailure { .. } => "engine",
        }
    }

    /// Configuration location of the offending entry, if any
    pub fn location(&self) -> Option<&ConfigLocation> {
        match self {
            RecipeError::UnknownRecipe { location, .. }
            | RecipeError::InvalidPrecision { location, .. }
            | RecipeError::InvalidPhaseResponse { location, .. }
            | RecipeError::InvalidPassbandEnd { location, .. }
            | RecipeError::InvalidStopbandBegin { location, .. }
            | RecipeError::InvalidAttenuation { location, .. }
            | RecipeError::MalformedNumber { location, .. } => Some(location),
            RecipeError::EngineInitFailure { .. } => None,
        }
    }
}

/// Errors that can occur while loading or writing configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write config file
    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config text is not valid TOML or does not match the block layout
    #[error("Failed to parse {origin}: {source}")]
    ParseError {
        origin: String,
        source: toml::de::Error,
    },

    /// The block parsed but does not describe a valid recipe
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Failed to create config directory
    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config directory path could not be determined
    #[error("Could not determine config directory path: {reason}")]
    PathResolutionError { reason: String },

    /// The shared profile lock was poisoned by a panicking writer
    #[error("Resampler profile lock is poisoned")]
    LockPoisoned,

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// The recipe error behind this failure, if validation was the cause
    pub fn as_recipe_error(&self) -> Option<&RecipeError> {
        match self {
            ConfigError::Recipe(e) => Some(e),
            _ => None,
        }
    }
}
