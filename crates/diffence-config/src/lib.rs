use diffence_engine::{FormatOptions, IndentPolicy, Limits, ScannerKind};
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

    #[error("Invalid value for `{field}` in {config_path}: {reason}")]
    InvalidValue {
        config_path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}

/// Settings read from `~/.config/diffence/config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub policy: IndentPolicy,
    pub scanner: ScannerKind,
    pub max_document_bytes: usize,
    pub max_fence_indent: usize,
    pub scan_budget_factor: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: IndentPolicy::default(),
            scanner: ScannerKind::default(),
            max_document_bytes: Limits::DEFAULT_MAX_DOCUMENT_BYTES,
            max_fence_indent: Limits::DEFAULT_MAX_FENCE_INDENT,
            scan_budget_factor: Limits::DEFAULT_SCAN_BUDGET_FACTOR,
        }
    }
}

impl Config {
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

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.validate(config_path)?;
        Ok(Some(config))
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

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/diffence");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and `$VARS` in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            policy: self.policy,
            scanner: self.scanner,
            limits: Limits {
                max_document_bytes: self.max_document_bytes,
                max_fence_indent: self.max_fence_indent,
                scan_budget_factor: self.scan_budget_factor,
            },
        }
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let invalid = |field, reason| ConfigError::InvalidValue {
            config_path: config_path.to_path_buf(),
            field,
            reason,
        };
        if self.scan_budget_factor == 0 {
            return Err(invalid("scan_budget_factor", "must be at least 1"));
        }
        if self.max_document_bytes == 0 {
            return Err(invalid("max_document_bytes", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/diffence/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            policy: IndentPolicy::Baseline,
            scanner: ScannerKind::Backtracking,
            max_fence_indent: 64,
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format_options(), FormatOptions::default());
    }

    #[test]
    fn test_kebab_case_enums() {
        let config: Config = toml::from_str(
            r#"
policy = "baseline"
scanner = "backtracking"
"#,
        )
        .unwrap();

        let opts = config.format_options();
        assert_eq!(opts.policy, IndentPolicy::Baseline);
        assert_eq!(opts.scanner, ScannerKind::Backtracking);
        assert_eq!(opts.limits, Limits::default());
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"/tmp\"\n").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_zero_scan_budget_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "scan_budget_factor = 0\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "scan_budget_factor",
                ..
            }
        ));
        assert!(err.to_string().contains("must be at least 1"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("DIFFENCE_TEST_DIR", "/test/env/path");
        }

        let path = PathBuf::from("$DIFFENCE_TEST_DIR/config.toml");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/config.toml"));

        unsafe {
            env::remove_var("DIFFENCE_TEST_DIR");
        }
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
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let test_config = Config {
            policy: IndentPolicy::Baseline,
            max_document_bytes: 1024,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
