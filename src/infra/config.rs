//! Configuration loading from TOML files
//!
//! Config file is selected via `--config <path>` or the CONFIG_FILE
//! environment variable (default: config/dev.toml). A missing or broken file
//! falls back to built-in defaults.

use crate::domain::fee::Tariff;
use crate::domain::types::Floor;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct GarageConfig {
    /// Name shown in the UI header
    #[serde(default = "default_garage_name")]
    pub name: String,
    /// Floor selected at startup ("EG", "1. OG" or "2. OG")
    #[serde(default = "default_floor_name")]
    pub default_floor: String,
}

fn default_garage_name() -> String {
    "Parkhaus".to_string()
}

fn default_floor_name() -> String {
    Floor::Ground.as_str().to_string()
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self { name: default_garage_name(), default_floor: default_floor_name() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TariffConfig {
    /// Price per started minute, in major currency units
    #[serde(default = "default_rate_per_minute")]
    pub rate_per_minute: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_rate_per_minute() -> f64 {
    0.50
}

fn default_currency() -> String {
    "CHF".to_string()
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self { rate_per_minute: default_rate_per_minute(), currency: default_currency() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptsConfig {
    /// Append a JSON line per park-out
    #[serde(default)]
    pub enabled: bool,
    /// File path for receipts (JSONL format)
    #[serde(default = "default_receipts_file")]
    pub file: String,
}

fn default_receipts_file() -> String {
    "receipts.jsonl".to_string()
}

impl Default for ReceiptsConfig {
    fn default() -> Self {
        Self { enabled: false, file: default_receipts_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log file; the terminal belongs to the UI
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One JSON object per log line
    #[serde(default)]
    pub json: bool,
}

fn default_log_file() -> String {
    "garage-slots.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { file: default_log_file(), level: default_log_level(), json: false }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub garage: GarageConfig,
    #[serde(default)]
    pub tariff: TariffConfig,
    #[serde(default)]
    pub receipts: ReceiptsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    garage_name: String,
    default_floor: Floor,
    tariff: Tariff,
    receipts_enabled: bool,
    receipts_file: String,
    log_file: String,
    log_level: String,
    log_json: bool,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            garage_name: default_garage_name(),
            default_floor: Floor::Ground,
            tariff: Tariff::default(),
            receipts_enabled: false,
            receipts_file: default_receipts_file(),
            log_file: default_log_file(),
            log_level: default_log_level(),
            log_json: false,
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        let default_floor = match toml_config.garage.default_floor.parse::<Floor>() {
            Ok(floor) => floor,
            Err(e) => {
                eprintln!("Warning: {}. Using {}.", e, Floor::Ground);
                Floor::Ground
            }
        };

        let rate = toml_config.tariff.rate_per_minute;
        let currency = toml_config.tariff.currency;
        let tariff = match Tariff::from_decimal_rate(rate, currency.clone()) {
            Ok(tariff) => tariff,
            Err(e) => {
                let fallback = Tariff::new(Tariff::default().rate_per_minute(), currency);
                eprintln!("Warning: {}. Using {}.", e, fallback.rate_per_minute());
                fallback
            }
        };

        Self {
            garage_name: toml_config.garage.name,
            default_floor,
            tariff,
            receipts_enabled: toml_config.receipts.enabled,
            receipts_file: toml_config.receipts.file,
            log_file: toml_config.logging.file,
            log_level: toml_config.logging.level,
            log_json: toml_config.logging.json,
            config_file,
        }
    }

    /// Load from a given path, falling back to defaults on any error
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn garage_name(&self) -> &str {
        &self.garage_name
    }

    pub fn default_floor(&self) -> Floor {
        self.default_floor
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn receipts_enabled(&self) -> bool {
        self.receipts_enabled
    }

    pub fn receipts_file(&self) -> &str {
        &self.receipts_file
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Override the log file (from the command line)
    pub fn with_log_file(mut self, file: impl Into<String>) -> Self {
        self.log_file = file.into();
        self
    }

    /// Builder method for tests to enable receipts at a path
    pub fn with_receipts_file(mut self, file: impl Into<String>) -> Self {
        self.receipts_enabled = true;
        self.receipts_file = file.into();
        self
    }
}
