use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::dataset_service::{CurrencyReference, PriceTable};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub prices: Arc<PriceTable>,
    pub currencies: Arc<CurrencyReference>,
}

#[cfg(test)]
use chrono::NaiveDate;

#[cfg(test)]
use crate::models::{CurrencyInfo, PriceRecord};

#[cfg(test)]
impl AppState {
    /// Two survey dates; CHF has no reference entry and JPY is missing in 2000.
    pub fn fixture() -> Self {
        let apr_2000 = NaiveDate::from_ymd_opt(2000, 4, 1).unwrap();
        let jul_2023 = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        Self::with_prices(vec![
            PriceRecord::new(apr_2000, "GBP", 1.9, 0.632911392, 3.002),
            PriceRecord::new(apr_2000, "USD", 2.51, 1.0, 2.51),
            PriceRecord::new(jul_2023, "USD", 5.0, 1.0, 5.0),
            PriceRecord::new(jul_2023, "GBP", 4.0, 0.8, 5.0),
            PriceRecord::new(jul_2023, "JPY", 450.0, 130.0, 3.46),
            PriceRecord::new(jul_2023, "CHF", 7.0, 0.9, 7.78),
        ])
    }

    /// Default config and the fixture's currency reference over the given prices.
    pub fn with_prices(records: Vec<PriceRecord>) -> Self {
        let info = |code: &str, name: &str, country: &str| CurrencyInfo {
            currency_code: code.to_string(),
            currency_name: name.to_string(),
            country: country.to_string(),
        };
        let currencies = CurrencyReference::new(vec![
            info("GBP", "Pound Sterling", "UNITED KINGDOM (THE)"),
            info("JPY", "Yen", "JAPAN"),
            info("USD", "US Dollar", "UNITED STATES OF AMERICA (THE)"),
        ]);

        let config = AppConfig::from_vars(|_| None);

        Self {
            config: Arc::new(config),
            prices: Arc::new(PriceTable::new(records)),
            currencies: Arc::new(currencies),
        }
    }
}
