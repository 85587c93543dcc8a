//! Service configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Default staking denomination used when summing deposits.
pub const DEFAULT_COIN_DENOM: &str = "nanolike";

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on `first` for list queries.
pub const MAX_PAGE_SIZE: usize = 100;

pub const DEFAULT_BATCH_DELAY_MS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub coin_denom: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { coin_denom: DEFAULT_COIN_DENOM.to_owned() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a query asks for zero items.
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_page_size: DEFAULT_PAGE_SIZE, max_page_size: MAX_PAGE_SIZE }
    }
}

impl PaginationConfig {
    /// Resolves the page size for a requested `first`.
    pub fn page_size(&self, first: usize) -> usize {
        if first == 0 {
            self.default_page_size
        } else {
            crate::connection::clamp_first(first, self.max_page_size)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// How long each loader collects keys before running its batch.
    pub batch_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_delay_ms: DEFAULT_BATCH_DELAY_MS }
    }
}

impl LoaderConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chain: ChainConfig,
    pub pagination: PaginationConfig,
    pub loader: LoaderConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults:
    ///
    /// - `GOVGRAPH_COIN_DENOM`
    /// - `GOVGRAPH_DEFAULT_PAGE_SIZE`
    /// - `GOVGRAPH_MAX_PAGE_SIZE`
    /// - `GOVGRAPH_LOADER_BATCH_DELAY_MS`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<L>(lookup: L) -> ConfigResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            chain: ChainConfig {
                coin_denom: lookup("GOVGRAPH_COIN_DENOM").unwrap_or(defaults.chain.coin_denom),
            },
            pagination: PaginationConfig {
                default_page_size: parse_var(
                    &lookup,
                    "GOVGRAPH_DEFAULT_PAGE_SIZE",
                    defaults.pagination.default_page_size,
                )?,
                max_page_size: parse_var(
                    &lookup,
                    "GOVGRAPH_MAX_PAGE_SIZE",
                    defaults.pagination.max_page_size,
                )?,
            },
            loader: LoaderConfig {
                batch_delay_ms: parse_var(
                    &lookup,
                    "GOVGRAPH_LOADER_BATCH_DELAY_MS",
                    defaults.loader.batch_delay_ms,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.chain.coin_denom.trim().is_empty() {
            return Err(ConfigError::Validation("coin denom must not be empty".to_owned()));
        }
        let PaginationConfig { default_page_size, max_page_size } = self.pagination;
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::Validation(format!(
                "default page size {default_page_size} must be between 1 and max page size {max_page_size}"
            )));
        }
        Ok(())
    }
}

fn parse_var<L, T>(lookup: &L, name: &str, default: T) -> ConfigResult<T>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_owned(), raw.clone())),
    }
}
