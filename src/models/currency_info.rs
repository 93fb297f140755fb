use serde::{Deserialize, Serialize};

// A row of the ISO currency code reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub currency_code: String,
    pub currency_name: String,
    pub country: String,
}
