use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::info;

use crate::external::source::{fetch_text, SourceError};
use crate::models::PriceRecord;

const REQUIRED_COLUMNS: [&str; 5] = ["date", "currency_code", "local_price", "dollar_ex", "dollar_price"];

// Only the columns we need; the published index carries many more (GDP, adjusted values).
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    currency_code: String,
    local_price: f64,
    dollar_ex: f64,
    dollar_price: f64,
}

pub async fn load_prices(client: &reqwest::Client, location: &str) -> Result<Vec<PriceRecord>, SourceError> {
    info!("Loading Big Mac prices from {}", location);
    let text = fetch_text(client, location).await?;
    let records = parse_prices(&text)?;
    info!("Loaded {} Big Mac price records", records.len());
    Ok(records)
}

pub fn parse_prices(text: &str) -> Result<Vec<PriceRecord>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SourceError::Parse(format!("Failed to read CSV header: {}", e)))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SourceError::MissingColumn(column.to_string()));
        }
    }

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(line_num, result)| {
            result
                .map(|row| {
                    PriceRecord::new(row.date, row.currency_code, row.local_price, row.dollar_ex, row.dollar_price)
                })
                .map_err(|e| SourceError::Parse(format!("Line {}: {}", line_num + 2, e)))
        })
        .collect()
}
