mod price_record;
mod currency_info;
mod valuation;

pub use price_record::{MergedRecord, PriceRecord, DATE_LABEL_FORMAT};
pub use currency_info::CurrencyInfo;
pub use valuation::{ValuationResponse, ValuationRow};
