use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::{PriceRecord, ValuationResponse, ValuationRow};
use crate::services::dataset_service::{CurrencyReference, DateSelector, PriceTable};

/// Local Big Mac price of the base currency. The slice must hold exactly one row for it.
pub fn find_base_price(records: &[PriceRecord], base_currency: &str) -> Result<f64, AppError> {
    let matches: Vec<&PriceRecord> = records
        .iter()
        .filter(|r| r.currency_code == base_currency)
        .collect();

    let date = records
        .first()
        .map(|r| r.date_label.clone())
        .unwrap_or_default();

    match matches.as_slice() {
        [only] => Ok(only.local_price),
        [] => Err(AppError::CurrencyNotFound {
            currency: base_currency.to_string(),
            date,
        }),
        many => {
            warn!("Base currency {} has {} rows for {}", base_currency, many.len(), date);
            Err(AppError::AmbiguousCurrency {
                currency: base_currency.to_string(),
                date,
                count: many.len(),
            })
        }
    }
}

/// Big Mac exchange rate: local price relative to the base currency's local price.
pub fn calculate_bmer(local_price: f64, base_price: f64) -> f64 {
    local_price / base_price
}

pub fn calculate_pct_over_under_valued(big_mac_exchange_rate: f64, dollar_exchange_rate: f64) -> f64 {
    (big_mac_exchange_rate / dollar_exchange_rate - 1.0) * 100.0
}

/// Values every row against the base currency, sorted from most undervalued up.
/// Rows whose percentage is NaN (a zero base price) go last whatever their sign bit.
pub fn value_slice(records: &[PriceRecord], base_currency: &str) -> Result<(f64, Vec<ValuationRow>), AppError> {
    let base_price = find_base_price(records, base_currency)?;

    let mut rows: Vec<ValuationRow> = records
        .iter()
        .map(|record| {
            let bmer = calculate_bmer(record.local_price, base_price);
            let pct = calculate_pct_over_under_valued(bmer, record.dollar_exchange_rate);
            ValuationRow::from_record(record, bmer, pct)
        })
        .collect();

    sort_rows(&mut rows);
    Ok((base_price, rows))
}

fn sort_rows(rows: &mut [ValuationRow]) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.pct_over_under_valued, b.pct_over_under_valued);
        a.is_nan().cmp(&b.is_nan()).then(a.total_cmp(&b))
    });
}

/// Filter, value and annotate one date of the dataset.
pub fn analyze(
    table: &PriceTable,
    reference: &CurrencyReference,
    selector: &DateSelector,
    base_currency: &str,
) -> Result<ValuationResponse, AppError> {
    let slice = table.filter(selector);
    if slice.is_empty() {
        return Err(AppError::DateNotFound(selector.to_string()));
    }

    let (base_price, mut rows) = value_slice(&slice, base_currency)?;
    for row in rows.iter_mut() {
        row.currency_name = reference.currency_name(&row.currency_code).map(str::to_string);
    }

    debug!(
        "Valued {} currencies for {} against {} (base price {})",
        rows.len(),
        selector,
        base_currency,
        base_price
    );

    Ok(ValuationResponse {
        base_currency: base_currency.to_string(),
        date_label: slice[0].date_label.clone(),
        base_price,
        rows,
    })
}
