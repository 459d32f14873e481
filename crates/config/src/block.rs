//! The `[resampler]` configuration block
//!
//! A block can be built in code or parsed from TOML. Parsed blocks remember the
//! line of every key so that validation errors point back at the file.

use crate::error::{ConfigError, ConfigLocation, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use toml::Spanned;

/// A configured value and where it was written
#[derive(Debug, Clone, PartialEq)]
pub struct Setting<T> {
    pub value: T,
    pub location: ConfigLocation,
}

impl<T> Setting<T> {
    /// A setting that did not come from a file
    pub fn new(value: T) -> Self {
        Self {
            value,
            location: ConfigLocation::unknown(),
        }
    }
}

/// Raw resampler settings, before any validation
///
/// Every key is optional here; resolution decides what a missing key means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResamplerBlock {
    /// Location of the block itself, used for keys that were left out
    pub location: ConfigLocation,
    pub quality: Option<Setting<String>>,
    pub precision: Option<Setting<i64>>,
    pub phase_response: Option<Setting<i64>>,
    pub passband_end: Option<Setting<String>>,
    pub stopband_begin: Option<Setting<String>>,
    pub attenuation: Option<Setting<String>>,
    pub flags: Option<Setting<u64>>,
}

impl ResamplerBlock {
    /// Creates a block selecting the given quality name
    pub fn new(quality: impl Into<String>) -> Self {
        Self {
            quality: Some(Setting::new(quality.into())),
            ..Default::default()
        }
    }

    pub fn with_precision(mut self, precision: i64) -> Self {
        self.precision = Some(Setting::new(precision));
        self
    }

    pub fn with_phase_response(mut self, phase_response: i64) -> Self {
        self.phase_response = Some(Setting::new(phase_response));
        self
    }

    pub fn with_passband_end(mut self, passband_end: impl Into<String>) -> Self {
        self.passband_end = Some(Setting::new(passband_end.into()));
        self
    }

    pub fn with_stopband_begin(mut self, stopband_begin: impl Into<String>) -> Self {
        self.stopband_begin = Some(Setting::new(stopband_begin.into()));
        self
    }

    pub fn with_attenuation(mut self, attenuation: impl Into<String>) -> Self {
        self.attenuation = Some(Setting::new(attenuation.into()));
        self
    }

    pub fn with_flags(mut self, flags: u64) -> Self {
        self.flags = Some(Setting::new(flags));
        self
    }

    /// Where `setting` was written, or the block location if it was omitted
    pub fn location_of<T>(&self, setting: &Option<Setting<T>>) -> ConfigLocation {
        setting
            .as_ref()
            .map_or_else(|| self.location.clone(), |s| s.location.clone())
    }

    /// Parses a block from TOML text containing a `[resampler]` table
    ///
    /// `path` is only used to annotate locations and error messages.
    pub fn from_toml(text: &str, path: Option<&Path>) -> ConfigResult<Self> {
        let raw: RawFile = toml::from_str(text).map_err(|source| ConfigError::ParseError {
            origin: path.map_or_else(
                || "inline configuration".to_string(),
                |p| format!("config file at {}", p.display()),
            ),
            source,
        })?;

        let lines = LineIndex { text, path };
        let block_location = lines
            .table_header("resampler")
            .unwrap_or_else(|| lines.locate(raw.resampler.span().start));
        let raw = raw.resampler.into_inner();

        Ok(Self {
            location: block_location,
            quality: raw.quality.map(|s| lines.setting(s)),
            precision: raw.precision.map(|s| lines.setting(s)),
            phase_response: raw.phase_response.map(|s| lines.setting(s)),
            passband_end: raw.passband_end.map(|s| lines.number_text(s)),
            stopband_begin: raw.stopband_begin.map(|s| lines.number_text(s)),
            attenuation: raw.attenuation.map(|s| lines.number_text(s)),
            flags: raw.flags.map(|s| lines.setting(s)),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    resampler: Spanned<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    quality: Option<Spanned<String>>,
    precision: Option<Spanned<i64>>,
    phase_response: Option<Spanned<i64>>,
    passband_end: Option<Spanned<NumberText>>,
    stopband_begin: Option<Spanned<NumberText>>,
    attenuation: Option<Spanned<NumberText>>,
    flags: Option<Spanned<u64>>,
}

/// Numeric settings are documented as strings, but bare TOML numbers are
/// accepted too and go through the same strict parser.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberText {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl NumberText {
    fn into_text(self) -> String {
        match self {
            NumberText::Text(text) => text,
            NumberText::Integer(value) => value.to_string(),
            NumberText::Float(value) => value.to_string(),
        }
    }
}

/// Maps byte offsets in the source text to 1-based lines
struct LineIndex<'a> {
    text: &'a str,
    path: Option<&'a Path>,
}

impl LineIndex<'_> {
    fn locate(&self, offset: usize) -> ConfigLocation {
        let end = offset.min(self.text.len());
        let line = self.text.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        ConfigLocation::at_line(self.path, line)
    }

    /// Location of a `[name]` header line, if the table is written that way
    fn table_header(&self, name: &str) -> Option<ConfigLocation> {
        let header = format!("[{}]", name);
        self.text
            .lines()
            .position(|line| line.trim_start().starts_with(&header))
            .map(|index| ConfigLocation::at_line(self.path, index + 1))
    }

    fn setting<T>(&self, spanned: Spanned<T>) -> Setting<T> {
        let location = self.locate(spanned.span().start);
        Setting {
            value: spanned.into_inner(),
            location,
        }
    }

    /// Keeps bare numbers as written when the literal is also valid number text
    fn number_text(&self, spanned: Spanned<NumberText>) -> Setting<String> {
        let span = spanned.span();
        let setting = self.setting(spanned);
        let value = match setting.value {
            NumberText::Text(text) => text,
            bare => match self.text.get(span).map(str::trim) {
                Some(raw) if raw.parse::<f64>().is_ok() => raw.to_string(),
                _ => bare.into_text(),
            },
        };
        Setting {
            value,
            location: setting.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builder_sets_values_without_location() {
        let block = ResamplerBlock::new("custom")
            .with_precision(24)
            .with_passband_end("90");
        assert_eq!(block.quality.as_ref().map(|s| s.value.as_str()), Some("custom"));
        assert_eq!(block.precision.as_ref().map(|s| s.value), Some(24));
        assert_eq!(
            block.passband_end.as_ref().map(|s| s.location.clone()),
            Some(ConfigLocation::unknown())
        );
        assert!(block.flags.is_none());
    }

    #[test]
    fn test_from_toml_records_lines() {
        let text = "\
# resampler settings
[resampler]
quality = \"custom\"

precision = 18
passband_end = \"95.0\"
";
        let block = ResamplerBlock::from_toml(text, None).expect("should parse");
        assert_eq!(block.location.line, Some(2));

        let quality = block.quality.expect("quality present");
        assert_eq!(quality.value, "custom");
        assert_eq!(quality.location.line, Some(3));

        let precision = block.precision.expect("precision present");
        assert_eq!(precision.value, 18);
        assert_eq!(precision.location.line, Some(5));

        assert_eq!(block.passband_end.map(|s| s.location.line), Some(Some(6)));
    }

    #[test]
    fn test_from_toml_keeps_path() {
        let path = PathBuf::from("/etc/resampler.toml");
        let block = ResamplerBlock::from_toml("[resampler]\nquality = \"high\"\n", Some(&path))
            .expect("should parse");
        let quality = block.quality.expect("quality present");
        assert_eq!(quality.location.path.as_deref(), Some(path.as_path()));
        assert_eq!(quality.location.to_string(), "/etc/resampler.toml:2");
    }

    #[test]
    fn test_bare_numbers_become_text() {
        let text = "[resampler]\nquality = \"custom\"\npassband_end = 90.5\nstopband_begin = 120\n";
        let block = ResamplerBlock::from_toml(text, None).expect("should parse");
        assert_eq!(block.passband_end.map(|s| s.value), Some("90.5".to_string()));
        assert_eq!(block.stopband_begin.map(|s| s.value), Some("120".to_string()));
    }

    #[test]
    fn test_bare_numbers_keep_written_form() {
        let text = "[resampler]\nquality = \"custom\"\npassband_end = 1e300\nattenuation = 1_0\n";
        let block = ResamplerBlock::from_toml(text, None).expect("should parse");
        assert_eq!(block.passband_end.map(|s| s.value), Some("1e300".to_string()));
        // Underscores are TOML syntax only, so the parsed value is used
        assert_eq!(block.attenuation.map(|s| s.value), Some("10".to_string()));
    }

    #[test]
    fn test_missing_keys_fall_back_to_block_location() {
        let text = "\n[resampler]\nquality = \"custom\"\n";
        let block = ResamplerBlock::from_toml(text, None).expect("should parse");
        assert_eq!(block.location_of(&block.flags).line, Some(2));
        assert_eq!(block.location_of(&block.quality).line, Some(3));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = "[resampler]\nquality = \"custom\"\npasband_end = \"90\"\n";
        let result = ResamplerBlock::from_toml(text, None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_negative_flags_rejected_by_parser() {
        let text = "[resampler]\nquality = \"custom\"\nflags = -1\n";
        let result = ResamplerBlock::from_toml(text, None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_missing_quality_is_allowed_by_parser() {
        let block = ResamplerBlock::from_toml("[resampler]\nprecision = 24\n", None)
            .expect("should parse");
        assert!(block.quality.is_none());
    }
}
