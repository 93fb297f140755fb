use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Month-year label used by the date selector, e.g. "Jul 2023".
pub const DATE_LABEL_FORMAT: &str = "%b %Y";

// One Big Mac observation for a country on a given survey date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub date_label: String,
    pub currency_code: String,
    pub local_price: f64,
    pub dollar_exchange_rate: f64,
    pub dollar_price: f64,
}

impl PriceRecord {
    pub fn new(
        date: NaiveDate,
        currency_code: impl Into<String>,
        local_price: f64,
        dollar_exchange_rate: f64,
        dollar_price: f64,
    ) -> Self {
        Self {
            date,
            date_label: date.format(DATE_LABEL_FORMAT).to_string(),
            currency_code: currency_code.into(),
            local_price,
            dollar_exchange_rate,
            dollar_price,
        }
    }
}

// A price record after the left join against the currency reference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub record: PriceRecord,
    pub currency_name: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label_is_month_year() {
        let record = PriceRecord::new(
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            "USD",
            5.58,
            1.0,
            5.58,
        );
        assert_eq!(record.date_label, "Jul 2023");
    }

    #[test]
    fn test_merged_record_flattens_price_fields() {
        let merged = MergedRecord {
            record: PriceRecord::new(NaiveDate::from_ymd_opt(2000, 4, 1).unwrap(), "GBP", 1.9, 0.632, 3.0),
            currency_name: Some("Pound Sterling".to_string()),
            country: None,
        };
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["currency_code"], "GBP");
        assert_eq!(json["date"], "2000-04-01");
        assert_eq!(json["currency_name"], "Pound Sterling");
        assert!(json["country"].is_null());
    }
}
