//! Configuration manager - loads resampler settings from disk

use crate::block::ResamplerBlock;
use crate::error::{ConfigError, ConfigLocation, ConfigResult};
use crate::preset::Preset;
use crate::profile::ResolvedProfile;
use crate::resolver::resolve;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name used inside a config directory
pub const CONFIG_FILE_NAME: &str = "resampler.toml";

/// Recipe used when no configuration file exists
pub const DEFAULT_PRESET: Preset = Preset::VeryHigh;

/// Commented template written by [`ConfigManager::initialize`]
pub const DEFAULT_TEMPLATE: &str = r#"# Resampler quality settings
[resampler]
# One of: very-high, high, medium, low, quick, custom
quality = "very-high"

# The keys below are only read when quality = "custom".
# precision = 28            # 16, 20, 24, 28 or 32 bits
# phase_response = 50       # 0 to 100
# passband_end = "95.0"     # percent of Nyquist, 1 to 100
# stopband_begin = "100.0"  # percent of Nyquist, 100 to 150
# attenuation = "0"         # decibels, 0 to 30
# flags = 0                 # engine flag bits, only the low six are used
"#;

/// Loads and resolves the resampler configuration file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager using the platform config directory
    ///
    /// - Linux: `~/.config/resampler/`
    /// - macOS: `~/Library/Application Support/resampler/`
    /// - Windows: `%APPDATA%\resampler\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a manager reading `resampler.toml` from a custom directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        Ok(Self::with_path(config_dir.join(CONFIG_FILE_NAME)))
    }

    /// Creates a manager for an explicit file path
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "resampler")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the `[resampler]` block without validating it
    ///
    /// A missing file yields a block selecting [`DEFAULT_PRESET`]. An empty
    /// file is treated as corrupted.
    pub fn load_block(&self) -> ConfigResult<ResamplerBlock> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using '{}'",
                self.config_path.display(),
                DEFAULT_PRESET
            );
            let mut block = ResamplerBlock::new(DEFAULT_PRESET.name());
            block.location = ConfigLocation {
                path: Some(self.config_path.clone()),
                line: None,
            };
            return Ok(block);
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        ResamplerBlock::from_toml(&contents, Some(&self.config_path))
    }

    /// Loads and resolves the configuration
    ///
    /// Any invalid value aborts the load; nothing is substituted.
    pub fn load(&self) -> ConfigResult<ResolvedProfile> {
        let block = self.load_block()?;
        Ok(resolve(&block)?)
    }

    /// Writes the commented default template if no config file exists
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path.display()
            );
            return Ok(false);
        }

        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Config path has no parent directory".to_string(),
            })?;
        self.ensure_directory_exists(dir)?;

        let temp_file = NamedTempFile::new_in(dir).map_err(ConfigError::IoError)?;
        self.write_atomic(temp_file, DEFAULT_TEMPLATE)?;

        log::info!("Generated default config at {}", self.config_path.display());
        Ok(true)
    }

    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::IoError)?;
        temp_file.flush().map_err(ConfigError::IoError)?;

        temp_file
            .persist_noclobber(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecipeError;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    #[test]
    fn test_config_file_path() {
        let (_temp_dir, manager) = setup_test_manager();
        assert!(manager.config_path().ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_missing_file_uses_default_preset() {
        let (_temp_dir, manager) = setup_test_manager();
        let resolved = manager.load().expect("Should resolve default");
        assert_eq!(resolved.recipe(), "very-high");
        assert_eq!(resolved.quality(), &Preset::VeryHigh.profile());
    }

    #[test]
    fn test_initialize_creates_loadable_file() {
        let (_temp_dir, manager) = setup_test_manager();

        let created = manager.initialize().expect("Should initialize");
        assert!(created);
        assert!(manager.config_path().exists());

        let resolved = manager.load().expect("Template should resolve");
        assert_eq!(resolved.recipe(), DEFAULT_PRESET.name());
    }

    #[test]
    fn test_initialize_keeps_existing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        fs::write(manager.config_path(), "[resampler]\nquality = \"low\"\n")
            .expect("Should write file");

        let created = manager.initialize().expect("Should initialize");
        assert!(!created);
        assert_eq!(manager.load().expect("Should load").recipe(), "low");
    }

    #[test]
    fn test_initialize_creates_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager =
            ConfigManager::with_directory(temp_dir.path().join("a").join("b")).expect("manager");
        assert!(manager.initialize().expect("Should initialize"));
        assert!(manager.config_path().exists());
    }

    #[test]
    fn test_empty_file_is_error() {
        let (_temp_dir, manager) = setup_test_manager();
        fs::write(manager.config_path(), "  \n").expect("Should write file");
        assert!(matches!(
            manager.load(),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_invalid_value_reports_file_and_line() {
        let (_temp_dir, manager) = setup_test_manager();
        fs::write(
            manager.config_path(),
            "[resampler]\nquality = \"custom\"\nprecision = 18\n",
        )
        .expect("Should write file");

        let err = manager.load().unwrap_err();
        let recipe_err = err.as_recipe_error().expect("validation failure");
        assert!(matches!(recipe_err, RecipeError::InvalidPrecision { value: 18, .. }));

        let location = recipe_err.location().expect("has location");
        assert_eq!(location.path.as_deref(), Some(manager.config_path()));
        assert_eq!(location.line, Some(3));
    }
}
