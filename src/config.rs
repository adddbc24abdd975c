use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory holding ingredients.json and recipes.json
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MatchingConfig {
    /// Recipes below this match percentage are hidden by `match`
    #[serde(default)]
    pub min_match_percent: u8,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShoppingConfig {
    /// Guess categories of items missing from the inventory
    #[serde(default)]
    pub guess_categories: bool,
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Structured JSON logs instead of console output
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__DATA__DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("data.dir", "data")?
            .set_default("matching.min_match_percent", 0)?
            .set_default("shopping.guess_categories", false)?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json", false)?;

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.matching.min_match_percent > 100 {
            return Err(format!(
                "min_match_percent must be between 0 and 100, got {}",
                self.matching.min_match_percent
            ));
        }
        if self.data.dir.as_os_str().is_empty() {
            return Err("Data directory must not be empty".to_string());
        }
        Ok(())
    }
}
