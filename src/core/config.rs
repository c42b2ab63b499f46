use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_EXCHANGE_RATES_URL: &str = "https://api.apilayer.com";
pub const DEFAULT_STOCKDATA_URL: &str = "https://api.stockdata.org";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRatesProviderConfig {
    #[serde(default = "default_exchange_rates_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StockDataProviderConfig {
    #[serde(default = "default_stockdata_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rates: Option<ExchangeRatesProviderConfig>,
    pub stockdata: Option<StockDataProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rates: Some(ExchangeRatesProviderConfig {
                base_url: default_exchange_rates_url(),
                api_key: String::new(),
            }),
            stockdata: Some(StockDataProviderConfig {
                base_url: default_stockdata_url(),
                api_token: String::new(),
            }),
        }
    }
}

fn default_exchange_rates_url() -> String {
    DEFAULT_EXCHANGE_RATES_URL.to_string()
}

fn default_stockdata_url() -> String {
    DEFAULT_STOCKDATA_URL.to_string()
}

fn default_currencies() -> Vec<String> {
    ["USD", "EUR"].iter().map(|c| c.to_string()).collect()
}

fn default_stocks() -> Vec<String> {
    ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// CSV file with `date,category,amount` rows
    pub transactions: Option<String>,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_stocks")]
    pub stocks: Vec<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            transactions: None,
            currencies: default_currencies(),
            stocks: default_stocks(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when it has not been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path_or_default(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fintally", "fintally")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path_or_default<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            debug!("No config at {}, using defaults", path.as_ref().display());
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn exchange_rates(&self) -> ExchangeRatesProviderConfig {
        self.providers
            .exchange_rates
            .clone()
            .unwrap_or_else(|| ExchangeRatesProviderConfig {
                base_url: default_exchange_rates_url(),
                api_key: String::new(),
            })
    }

    pub fn stockdata(&self) -> StockDataProviderConfig {
        self.providers
            .stockdata
            .clone()
            .unwrap_or_else(|| StockDataProviderConfig {
                base_url: default_stockdata_url(),
                api_token: String::new(),
            })
    }
}
