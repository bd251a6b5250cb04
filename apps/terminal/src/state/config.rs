//! # Configuration State
//!
//! Read-only settings for the terminal.
//!
//! ## Load Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ConfigState::default()                                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  config.toml (optional) ─── BREW_CONFIG_PATH, else the platform         │
//! │        │                    config dir (directories::ProjectDirs)       │
//! │        ▼                                                                │
//! │  BREW_* environment overrides                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate() ─────────────► ConfigError on a bad value                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `config.toml`
//! ```toml
//! storeName = "Brew Corner"
//! taxRateBps = 1200
//! memberSearchLimit = 5
//! freeItemValuation = "cheapest-line"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use brew_core::validation::validate_tax_rate_bps;
use brew_core::{
    Checkout, Money, TaxRate, ValidationError, ValuationStrategy, DEFAULT_MEMBER_SEARCH_LIMIT,
    DEFAULT_TAX_RATE_BPS,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_CONFIG_PATH: &str = "BREW_CONFIG_PATH";
pub const ENV_STORE_NAME: &str = "BREW_STORE_NAME";
pub const ENV_TAX_RATE: &str = "BREW_TAX_RATE";
pub const ENV_CURRENCY_SYMBOL: &str = "BREW_CURRENCY_SYMBOL";
pub const ENV_MEMBER_SEARCH_LIMIT: &str = "BREW_MEMBER_SEARCH_LIMIT";
pub const ENV_FREE_ITEM_VALUATION: &str = "BREW_FREE_ITEM_VALUATION";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be interpreted.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidOverride { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Store name (receipt header)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// VAT rate in basis points, 1200 = 12%
    pub tax_rate_bps: u32,

    /// Most members a name search returns
    pub member_search_limit: usize,

    /// How free-item rewards are valued
    pub free_item_valuation: ValuationStrategy,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Brew POS Coffee Shop"
    /// - Currency: PHP (₱)
    /// - Tax: 12% VAT
    /// - Member search: 5 results
    /// - Free items: valued at zero
    fn default() -> Self {
        ConfigState {
            store_name: "Brew POS Coffee Shop".to_string(),
            store_address: vec!["Ground Floor, Main Street".to_string(), "Manila".to_string()],
            currency_code: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            member_search_limit: DEFAULT_MEMBER_SEARCH_LIMIT,
            free_item_valuation: ValuationStrategy::Zero,
        }
    }
}

impl ConfigState {
    /// Runs the full load chain against the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);
        let path = explicit.clone().or_else(default_config_path);

        let mut config = match path {
            // An explicitly named file must exist
            Some(p) if explicit.is_some() || p.exists() => ConfigState::from_file(&p)?,
            _ => ConfigState::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            store = %config.store_name,
            tax_rate_bps = config.tax_rate_bps,
            valuation = %config.free_item_valuation,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reads a TOML file. Keys it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading config file");
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Applies `BREW_*` overrides from `lookup`.
    ///
    /// `BREW_TAX_RATE` is a percentage ("12", "8.25").
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_STORE_NAME) {
            self.store_name = name;
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.currency_symbol = symbol;
        }

        if let Some(raw) = lookup(ENV_TAX_RATE) {
            let pct: f64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|p: &f64| p.is_finite() && *p >= 0.0)
                .ok_or(ConfigError::InvalidOverride {
                    key: ENV_TAX_RATE,
                    value: raw.clone(),
                })?;
            self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
        }

        if let Some(raw) = lookup(ENV_MEMBER_SEARCH_LIMIT) {
            self.member_search_limit =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        key: ENV_MEMBER_SEARCH_LIMIT,
                        value: raw.clone(),
                    })?;
        }

        if let Some(raw) = lookup(ENV_FREE_ITEM_VALUATION) {
            self.free_item_valuation = raw.parse()?;
        }

        Ok(())
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "store name".to_string(),
            }
            .into());
        }

        if self.currency_symbol.is_empty() {
            return Err(ValidationError::Required {
                field: "currency symbol".to_string(),
            }
            .into());
        }

        validate_tax_rate_bps(self.tax_rate_bps)?;

        if self.member_search_limit == 0 {
            return Err(ValidationError::MustBePositive {
                field: "member search limit".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// A fresh checkout carrying the configured tax rate and valuation.
    pub fn new_checkout(&self) -> Checkout {
        Checkout::new(self.tax_rate()).with_valuation(self.free_item_valuation)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_centavos(123_450)), "₱1234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let centavos = amount.centavos();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = centavos / divisor;
        let frac = (centavos % divisor).abs();

        format!(
            "{}{}{}",
            if centavos < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// `<platform config dir>/config.toml`, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "brew", "pos").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
