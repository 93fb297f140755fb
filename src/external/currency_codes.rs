use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::external::source::{fetch_text, SourceError};
use crate::models::CurrencyInfo;

pub async fn fetch_currency_codes(client: &reqwest::Client, location: &str) -> Result<Vec<CurrencyInfo>, SourceError> {
    info!("Fetching currency code table from {}", location);
    let html = fetch_text(client, location).await?;
    let currencies = parse_currency_table(&html)?;
    info!("Scraped {} currency code rows", currencies.len());
    Ok(currencies)
}

/// Extracts `Code`, `Currency` and `Country` from the first table of the page.
pub fn parse_currency_table(html: &str) -> Result<Vec<CurrencyInfo>, SourceError> {
    let table_sel = Selector::parse("table").expect("Invalid CSS selector for tables");
    let row_sel = Selector::parse("tr").expect("Invalid CSS selector for table rows");
    let cell_sel = Selector::parse("th, td").expect("Invalid CSS selector for table cells");

    let document = Html::parse_document(html);
    let table = document.select(&table_sel).next().ok_or(SourceError::NoTable)?;

    let mut rows = table
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty());

    let header = rows.next().ok_or(SourceError::MissingColumn("Code".to_string()))?;
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
    };
    let code_idx = column("Code")?;
    let currency_idx = column("Currency")?;
    let country_idx = column("Country")?;

    let currencies = rows
        .filter_map(|cells| {
            let code = cells.get(code_idx)?;
            if code.is_empty() {
                return None;
            }
            Some(CurrencyInfo {
                currency_code: code.clone(),
                currency_name: cells.get(currency_idx).cloned().unwrap_or_default(),
                country: cells.get(country_idx).cloned().unwrap_or_default(),
            })
        })
        .collect();

    Ok(currencies)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <h1>Currency Codes</h1>
  <table class="table">
    <thead>
      <tr><th>Country</th><th>Currency</th><th>Code</th><th>Number</th></tr>
    </thead>
    <tbody>
      <tr><td>UNITED KINGDOM (THE)</td><td>Pound Sterling</td><td>GBP</td><td>826</td></tr>
      <tr><td>  JAPAN </td><td>Yen</td><td> JPY </td><td>392</td></tr>
      <tr><td>ANTARCTICA</td><td>No universal currency</td><td></td><td></td></tr>
    </tbody>
  </table>
  <table><tr><th>Code</th></tr><tr><td>XXX</td></tr></table>
</body></html>
"#;

    #[test]
    fn test_parse_first_table_by_column_name() {
        let rows = parse_currency_table(PAGE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            CurrencyInfo {
                currency_code: "GBP".to_string(),
                currency_name: "Pound Sterling".to_string(),
                country: "UNITED KINGDOM (THE)".to_string(),
            }
        );
        assert_eq!(rows[1].currency_code, "JPY");
        assert_eq!(rows[1].country, "JAPAN");
    }

    #[test]
    fn test_no_table_is_error() {
        let err = parse_currency_table("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, SourceError::NoTable));
    }

    #[test]
    fn test_missing_column_is_error() {
        let html = "<table><tr><th>Code</th><th>Country</th></tr><tr><td>USD</td><td>US</td></tr></table>";
        let err = parse_currency_table(html).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn(ref c) if c == "Currency"));
    }
}
