//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::{GeneratorConfig, DEFAULT_SEED};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_dashboard_path() -> String {
    "/dashboard/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dashboard_path: default_dashboard_path(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Synthetic data configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    #[serde(default = "default_mean")]
    pub mean: f64,

    #[serde(default = "default_std_dev")]
    pub std_dev: f64,

    #[serde(default = "default_seasonal_amplitude")]
    pub seasonal_amplitude: f64,

    #[serde(default = "default_weekend_boost")]
    pub weekend_boost: f64,

    #[serde(default = "default_floor")]
    pub floor: f64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_start_date() -> NaiveDate {
    GeneratorConfig::default().start_date
}

fn default_end_date() -> NaiveDate {
    GeneratorConfig::default().end_date
}

fn default_mean() -> f64 {
    GeneratorConfig::default().mean
}

fn default_std_dev() -> f64 {
    GeneratorConfig::default().std_dev
}

fn default_seasonal_amplitude() -> f64 {
    GeneratorConfig::default().seasonal_amplitude
}

fn default_weekend_boost() -> f64 {
    GeneratorConfig::default().weekend_boost
}

fn default_floor() -> f64 {
    GeneratorConfig::default().floor
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            mean: default_mean(),
            std_dev: default_std_dev(),
            seasonal_amplitude: default_seasonal_amplitude(),
            weekend_boost: default_weekend_boost(),
            floor: default_floor(),
        }
    }
}

impl DataConfig {
    /// Generator settings described by this section
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            start_date: self.start_date,
            end_date: self.end_date,
            mean: self.mean,
            std_dev: self.std_dev,
            seasonal_amplitude: self.seasonal_amplitude,
            weekend_boost: self.weekend_boost,
            floor: self.floor,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether to emit JSON lines instead of pretty output
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the first default location that exists, or environment only
    ///
    /// Returns the config and the file it came from.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&default_paths())
    }

    /// Load the first existing file among `candidates`
    ///
    /// A file that exists but fails to load is an error; only when no
    /// candidate exists does this fall back to defaults.
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("SALESDASH_HOST") {
            self.server.host = host;
        }
        if let Some(p) = lookup("SALESDASH_PORT").and_then(|s| s.parse().ok()) {
            self.server.port = p;
        }

        // Data overrides
        if let Some(seed) = lookup("SALESDASH_SEED").and_then(|s| s.parse().ok()) {
            self.data.seed = seed;
        }

        // Logging overrides
        if let Some(level) = lookup("SALESDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SALESDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Default config file locations, in search order
pub fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("salesdash").join("config.toml")),
        Some(PathBuf::from("/etc/salesdash/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sales Dashboard Configuration
#
# Environment variables override these settings:
# - SALESDASH_HOST
# - SALESDASH_PORT
# - SALESDASH_SEED
# - SALESDASH_LOG_LEVEL
# - SALESDASH_LOG_FORMAT

[server]
# Address to bind to
host = "0.0.0.0"

# Port to listen on
port = 8080

# Path the dashboard page is served under
dashboard_path = "/dashboard/"

[data]
# Seed for the synthetic sales table (same seed, same rows)
seed = 42

# Inclusive date range of generated rows
start_date = "2024-01-01"
end_date = "2024-12-31"

# Daily base value: normal distribution
mean = 250.0
std_dev = 50.0

# Yearly sine seasonality, in [0, 1)
seasonal_amplitude = 0.3

# Weekend multiplier for Electronics and Books
weekend_boost = 1.2

# Minimum value of any row
floor = 50.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.server.dashboard_path, "/dashboard/");
        assert_eq!(config.data.seed, 42);
        assert_eq!(config.data.generator(), GeneratorConfig::default());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_default_config_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[data]\nseed = 7\nend_date = \"2024-06-30\"\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.seed, 7);
        assert_eq!(
            config.data.end_date,
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert_eq!(config.data.floor, 50.0);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[server\nport = \"eighty\"").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_uses_first_existing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[server]\nport = 9191\n").unwrap();

        let (config, source) = Config::load_first(&[missing.clone(), present.clone()]).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(source, Some(present));

        let (config, source) = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(source, None);
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "seed = \"oops\"\nend_date = \"2024-01-07\"\n").unwrap();

        match Config::load_first(&[dir.path().join("missing.toml"), broken.clone()]) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {:?}", other),
        }

        std::fs::write(&broken, "[data]\nseed = \"oops\"\n").unwrap();
        assert!(matches!(
            Config::load_first(&[broken]),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_paths_end_with_working_directory() {
        let paths = default_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("./config.toml")));
        assert!(paths.contains(&PathBuf::from("/etc/salesdash/config.toml")));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SALESDASH_HOST", "127.0.0.1"),
            ("SALESDASH_PORT", "3000"),
            ("SALESDASH_SEED", "not-a-number"),
            ("SALESDASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.addr(), "127.0.0.1:3000");
        assert_eq!(config.data.seed, 42);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
