use chrono::NaiveDate;
use serde::Serialize;

use crate::models::PriceRecord;

// A price record with the derived Big Mac Index columns for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationRow {
    pub date: NaiveDate,
    pub date_label: String,
    pub currency_code: String,
    pub currency_name: Option<String>,
    pub local_price: f64,
    pub dollar_exchange_rate: f64,
    pub dollar_price: f64,
    pub big_mac_exchange_rate: f64,
    pub pct_over_under_valued: f64,
}

impl ValuationRow {
    pub fn from_record(record: &PriceRecord, big_mac_exchange_rate: f64, pct_over_under_valued: f64) -> Self {
        Self {
            date: record.date,
            date_label: record.date_label.clone(),
            currency_code: record.currency_code.clone(),
            currency_name: None,
            local_price: record.local_price,
            dollar_exchange_rate: record.dollar_exchange_rate,
            dollar_price: record.dollar_price,
            big_mac_exchange_rate,
            pct_over_under_valued,
        }
    }
}

/// Valuation of every currency for one date against one base currency.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationResponse {
    pub base_currency: String,
    pub date_label: String,
    pub base_price: f64,
    pub rows: Vec<ValuationRow>,
}
