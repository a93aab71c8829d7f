//! Configuration types and loading.
//!
//! The main entry point is [`KuchlerConfig`], which represents the contents of
//! `.kuchler/config.yaml`. Configuration is loaded with [`load_config`] and
//! saved with [`save_config`].
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. `.kuchler/config.yaml`
//! 3. `KUCHLER_*` environment variables (`KUCHLER_EXPORTS_DIR=out`)

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "KUCHLER_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to write config file: {0}")]
    WriteError(#[from] serde_yaml::Error),

    /// The layered configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    ParseError(#[from] Box<figment::Error>),

    /// The `.kuchler/` directory was not found.
    #[error("no .kuchler directory found (run 'kuchler init' first)")]
    DataDirNotFound,

    /// A configuration key does not exist.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Color mode
// ---------------------------------------------------------------------------

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal (default).
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(ConfigError::InvalidValue {
                key: "color".into(),
                reason: format!("expected auto, always or never (got '{other}')"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full kuchler configuration, corresponding to `.kuchler/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KuchlerConfig {
    /// Projects data file, relative to the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// CSV export directory, relative to the project root.
    #[serde(default = "default_exports_dir")]
    pub exports_dir: String,

    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Terminal color policy.
    #[serde(default)]
    pub color: ColorMode,
}

impl Default for KuchlerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            exports_dir: default_exports_dir(),
            json: false,
            color: ColorMode::default(),
        }
    }
}

fn default_data_file() -> String {
    "data.json".to_string()
}

fn default_exports_dir() -> String {
    "exports".to_string()
}

/// Keys accepted by [`KuchlerConfig::get`] and [`KuchlerConfig::set`].
pub const KEYS: [&str; 4] = ["data-file", "exports-dir", "json", "color"];

impl KuchlerConfig {
    /// Absolute path of the projects data file.
    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data_file)
    }

    /// Absolute path of the exports directory.
    ///
    /// Relative values resolve against the directory containing `.kuchler/`.
    pub fn exports_path(&self, data_dir: &Path) -> PathBuf {
        let root = data_dir.parent().unwrap_or(data_dir);
        root.join(&self.exports_dir)
    }

    /// Reads a value by key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "data-file" => Ok(self.data_file.clone()),
            "exports-dir" => Ok(self.exports_dir.clone()),
            "json" => Ok(self.json.to_string()),
            "color" => Ok(self.color.as_str().to_string()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Sets a value by key, validating it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" | "exports-dir" if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "path cannot be empty".into(),
                });
            }
            "data-file" => self.data_file = value.to_string(),
            "exports-dir" => self.exports_dir = value.to_string(),
            "json" => {
                self.json = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected true or false (got '{value}')"),
                })?;
            }
            "color" => self.color = value.parse()?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// All `(key, value)` pairs in [`KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).ok().map(|v| (*k, v)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The layered figment for a data directory: defaults, YAML file, env.
pub fn figment(data_dir: &Path) -> Figment {
    Figment::from(Serialized::defaults(KuchlerConfig::default()))
        .merge(Yaml::file(data_dir.join(CONFIG_FILE)))
        .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace('_', "-").into()))
}

/// Load configuration for the given `.kuchler/` directory.
///
/// A missing file yields the defaults (plus any environment overrides).
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the file or an override holds a
/// value of the wrong type.
pub fn load_config(data_dir: &Path) -> Result<KuchlerConfig> {
    figment(data_dir).extract().map_err(|e| ConfigError::ParseError(Box::new(e)))
}

/// Load only defaults and `config.yaml`, without environment overrides.
///
/// Used before rewriting the file so that overrides are not persisted.
pub fn load_file_config(data_dir: &Path) -> Result<KuchlerConfig> {
    Figment::from(Serialized::defaults(KuchlerConfig::default()))
        .merge(Yaml::file(data_dir.join(CONFIG_FILE)))
        .extract()
        .map_err(|e| ConfigError::ParseError(Box::new(e)))
}

/// Save configuration to `config.yaml` inside the given `.kuchler/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(data_dir: &Path, config: &KuchlerConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(data_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = KuchlerConfig::default();
        assert_eq!(cfg.data_file, "data.json");
        assert_eq!(cfg.exports_dir, "exports");
        assert!(!cfg.json);
        assert_eq!(cfg.color, ColorMode::Auto);
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        Jail::expect_with(|jail| {
            let cfg = load_config(&jail.directory().join(".kuchler")).unwrap();
            assert_eq!(cfg, KuchlerConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_partial_yaml_and_env_override() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().join(".kuchler");
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join(CONFIG_FILE), "exports-dir: csv\ncolor: never\n").unwrap();
            jail.set_env("KUCHLER_JSON", "true");
            jail.set_env("KUCHLER_EXPORTS_DIR", "out");

            let cfg = load_config(&dir).unwrap();
            assert_eq!(cfg.exports_dir, "out");
            assert_eq!(cfg.color, ColorMode::Never);
            assert!(cfg.json);
            assert_eq!(cfg.data_file, "data.json");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_yaml_value() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().join(".kuchler");
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join(CONFIG_FILE), "color: purple\n").unwrap();
            let err = load_config(&dir).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError(_)));
            Ok(())
        });
    }

    #[test]
    fn test_file_config_ignores_env() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().join(".kuchler");
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join(CONFIG_FILE), "json: false\n").unwrap();
            jail.set_env("KUCHLER_JSON", "true");

            assert!(load_config(&dir).unwrap().json);
            assert!(!load_file_config(&dir).unwrap().json);
            Ok(())
        });
    }

    #[test]
    fn test_roundtrip_config() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().join(".kuchler");
            let mut cfg = KuchlerConfig::default();
            cfg.set("data-file", "campo.json").unwrap();
            cfg.set("color", "always").unwrap();

            save_config(&dir, &cfg).unwrap();
            let loaded = load_config(&dir).unwrap();
            assert_eq!(loaded, cfg);
            Ok(())
        });
    }

    #[test]
    fn test_get_set_validation() {
        let mut cfg = KuchlerConfig::default();
        assert_eq!(cfg.get("json").unwrap(), "false");
        cfg.set("json", "true").unwrap();
        assert!(cfg.json);
        assert!(matches!(cfg.set("json", "yes"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("exports-dir", " "), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.get("theme"), Err(ConfigError::UnknownKey(_))));
        assert_eq!(cfg.entries().len(), KEYS.len());
    }

    #[test]
    fn test_paths_resolve_against_data_dir() {
        let cfg = KuchlerConfig::default();
        let dir = Path::new("/field/.kuchler");
        assert_eq!(cfg.data_path(dir), PathBuf::from("/field/.kuchler/data.json"));
        assert_eq!(cfg.exports_path(dir), PathBuf::from("/field/exports"));
    }
}
