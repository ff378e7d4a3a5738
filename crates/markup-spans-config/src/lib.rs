use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cache.capacity must be at least 1")]
    ZeroCacheCapacity,

    #[error("cache.max_key_length must be at least 1")]
    ZeroCacheKeyLength,

    #[error("parser.max_nesting_depth must be at least 1")]
    ZeroNestingDepth,

    #[error("{field} must be within 0.0..=1.0, got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidFactor { field: &'static str, value: f32 },
}

/// Parse-result cache sizing, shared by the read-only and edit builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached parse results. Any value of at least 1 is
    /// accepted; memory is only used for entries actually cached.
    pub capacity: usize,
    /// Inputs longer than this (in bytes) bypass the cache.
    pub max_key_length: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            max_key_length: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Deepest nesting level kept; an outermost pair is level 1.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 2,
        }
    }
}

/// Read-only rendering of superscript and subscript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichConfig {
    /// Baseline raise per superscript level, as a fraction of the font size.
    pub superscript_rise: f32,
    /// Baseline drop per subscript level, as a fraction of the font size.
    pub subscript_drop: f32,
}

impl Default for RichConfig {
    fn default() -> Self {
        Self {
            superscript_rise: 0.4,
            subscript_drop: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Alpha multiplier applied to the base style for visible markers.
    pub marker_opacity: f32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            marker_opacity: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub parser: ParserConfig,
    pub rich: RichConfig,
    pub edit: EditConfig,
}

impl Config {
    /// Loads and validates the config at `config_path`.
    ///
    /// Returns `Ok(None)` if the file does not exist. Missing keys fall back
    /// to their defaults.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::from_toml_str(&content).map_err(|source| match source {
            ConfigError::ConfigParseError { source, .. } => ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the user config, or the defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                config_path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the parser cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        if self.cache.max_key_length == 0 {
            return Err(ConfigError::ZeroCacheKeyLength);
        }
        if self.parser.max_nesting_depth == 0 {
            return Err(ConfigError::ZeroNestingDepth);
        }
        let opacity = self.edit.marker_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::OutOfUnitRange {
                field: "edit.marker_opacity",
                value: opacity,
            });
        }
        for (field, value) in [
            ("rich.superscript_rise", self.rich.superscript_rise),
            ("rich.subscript_drop", self.rich.subscript_drop),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFactor { field, value });
            }
        }
        Ok(())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markup-spans");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markup-spans/config.toml"));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.capacity, 200);
        assert_eq!(config.cache.max_key_length, 2000);
        assert_eq!(config.parser.max_nesting_depth, 2);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.cache.capacity = 64;
        original.edit.marker_opacity = 0.5;

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
[cache]
capacity = 10
"#,
        )
        .unwrap();

        assert_eq!(config.cache.capacity, 10);
        assert_eq!(config.cache.max_key_length, 2000);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_zero_capacity_fails_fast() {
        let err = Config::from_toml_str("[cache]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCacheCapacity));
    }

    #[test]
    fn test_large_capacity_accepted() {
        let config = Config::from_toml_str("[cache]\ncapacity = 9223372036854775807\n").unwrap();
        assert_eq!(config.cache.capacity, 9_223_372_036_854_775_807);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = Config::from_toml_str("[parser]\nmax_nesting_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroNestingDepth));
    }

    #[test]
    fn test_opacity_out_of_range_rejected() {
        let err = Config::from_toml_str("[edit]\nmarker_opacity = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfUnitRange {
                field: "edit.marker_opacity",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_script_factor_rejected() {
        let err = Config::from_toml_str("[rich]\nsubscript_drop = -0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFactor { .. }));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.parser.max_nesting_depth = 3;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "cache = [not toml").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        match err {
            ConfigError::ConfigParseError { config_path, .. } => {
                assert_eq!(config_path, config_file);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file_is_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[cache]\nmax_key_length = 0\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ZeroCacheKeyLength));
    }
}
