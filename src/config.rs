use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub proximity_radius_nm: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_size_weight")]
    pub size: f64,
    #[serde(default = "default_laycan_weight")]
    pub laycan: f64,
    #[serde(default = "default_rate_weight")]
    pub rate: f64,
    #[serde(default = "default_port_weight")]
    pub port: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_charterer_weight")]
    pub charterer: f64,
    #[serde(default = "default_cargo_type_weight")]
    pub cargo_type: f64,
    #[serde(default = "default_port_efficiency_weight")]
    pub port_efficiency: f64,
    #[serde(default = "default_historical_weight")]
    pub historical_performance: f64,
    #[serde(default = "default_market_trend_weight")]
    pub market_trend: f64,
    #[serde(default = "default_geographic_weight")]
    pub geographic_proximity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            size: default_size_weight(),
            laycan: default_laycan_weight(),
            rate: default_rate_weight(),
            port: default_port_weight(),
            age: default_age_weight(),
            charterer: default_charterer_weight(),
            cargo_type: default_cargo_type_weight(),
            port_efficiency: default_port_efficiency_weight(),
            historical_performance: default_historical_weight(),
            market_trend: default_market_trend_weight(),
            geographic_proximity: default_geographic_weight(),
        }
    }
}

fn default_size_weight() -> f64 { 0.20 }
fn default_laycan_weight() -> f64 { 0.15 }
fn default_rate_weight() -> f64 { 0.20 }
fn default_port_weight() -> f64 { 0.10 }
fn default_age_weight() -> f64 { 0.10 }
fn default_charterer_weight() -> f64 { 0.05 }
fn default_cargo_type_weight() -> f64 { 0.05 }
fn default_port_efficiency_weight() -> f64 { 0.05 }
fn default_historical_weight() -> f64 { 0.04 }
fn default_market_trend_weight() -> f64 { 0.03 }
fn default_geographic_weight() -> f64 { 0.03 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with DRYBULK_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with DRYBULK_)
            // e.g., DRYBULK_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DRYBULK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DRYBULK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
