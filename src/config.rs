use std::net::SocketAddr;

use anyhow::{bail, Context};

use crate::logging::LoggingConfig;

pub const DEFAULT_CSV_URL: &str =
    "https://raw.githubusercontent.com/jasonmlee/Big-Mac-Index/main/big-mac-full-index.csv";
pub const DEFAULT_CURRENCY_CODES_URL: &str = "https://www.iban.com/currency-codes";
pub const DEFAULT_BASE_CURRENCIES: &str = "USD,CAD,CNY,GBP,JPY";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_url: String,
    /// `None` skips the currency name lookup entirely.
    pub currency_codes_url: Option<String>,
    pub base_currencies: Vec<String>,
    pub bind_addr: String,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let currency_codes_url = match var("CURRENCY_CODES_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url.trim().to_string()),
            None => Some(DEFAULT_CURRENCY_CODES_URL.to_string()),
        };

        Self {
            csv_url: var("BIG_MAC_CSV_URL").unwrap_or_else(|| DEFAULT_CSV_URL.to_string()),
            currency_codes_url,
            base_currencies: parse_currency_list(
                &var("BASE_CURRENCIES").unwrap_or_else(|| DEFAULT_BASE_CURRENCIES.to_string()),
            ),
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            logging: LoggingConfig::from_vars(&var),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.csv_url.trim().is_empty() {
            bail!("BIG_MAC_CSV_URL must not be empty");
        }
        if self.base_currencies.is_empty() {
            bail!("BASE_CURRENCIES must list at least one currency code");
        }
        if let Some(bad) = self
            .base_currencies
            .iter()
            .find(|c| c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_alphabetic()))
        {
            bail!("BASE_CURRENCIES contains invalid code: {}", bad);
        }
        self.socket_addr()?;
        self.logging.validate()
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR {}", self.bind_addr))
    }

    pub fn default_base_currency(&self) -> &str {
        self.base_currencies.first().map(String::as_str).unwrap_or("USD")
    }

    pub fn is_base_currency(&self, code: &str) -> bool {
        self.base_currencies.iter().any(|c| c == code)
    }
}

fn parse_currency_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}
