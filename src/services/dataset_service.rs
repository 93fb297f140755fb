use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::{CurrencyInfo, MergedRecord, PriceRecord, DATE_LABEL_FORMAT};

/// How a user picks a survey date: an exact ISO date or a month-year label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelector {
    Exact(NaiveDate),
    Label(String),
}

impl DateSelector {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            Ok(date) => DateSelector::Exact(date),
            Err(_) => DateSelector::Label(input.to_string()),
        }
    }

    /// The month-year label this selector falls in.
    pub fn label(&self) -> String {
        match self {
            DateSelector::Exact(date) => date.format(DATE_LABEL_FORMAT).to_string(),
            DateSelector::Label(label) => label.clone(),
        }
    }

    pub fn matches(&self, record: &PriceRecord) -> bool {
        match self {
            DateSelector::Exact(date) => record.date == *date,
            DateSelector::Label(label) => record.date_label == *label,
        }
    }
}

impl fmt::Display for DateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSelector::Exact(date) => write!(f, "{}", date),
            DateSelector::Label(label) => write!(f, "{}", label),
        }
    }
}

/// The full Big Mac dataset, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
    date_labels: Vec<String>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        let mut ordered: Vec<&PriceRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.date);

        let mut date_labels: Vec<String> = Vec::new();
        for record in ordered {
            if !date_labels.contains(&record.date_label) {
                date_labels.push(record.date_label.clone());
            }
        }

        Self { records, date_labels }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Distinct month-year labels, oldest first.
    pub fn date_labels(&self) -> &[String] {
        &self.date_labels
    }

    pub fn latest_label(&self) -> Option<&str> {
        self.date_labels.last().map(String::as_str)
    }

    pub fn filter(&self, selector: &DateSelector) -> Vec<PriceRecord> {
        self.records
            .iter()
            .filter(|r| selector.matches(r))
            .cloned()
            .collect()
    }
}

/// Scraped ISO currency reference data, keyed by currency code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyReference {
    by_code: HashMap<String, Vec<CurrencyInfo>>,
}

impl CurrencyReference {
    pub fn new(rows: Vec<CurrencyInfo>) -> Self {
        let mut by_code: HashMap<String, Vec<CurrencyInfo>> = HashMap::new();
        for row in rows {
            by_code.entry(row.currency_code.clone()).or_default().push(row);
        }
        Self { by_code }
    }

    pub fn len(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn currency_name(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(code)
            .and_then(|rows| rows.first())
            .map(|info| info.currency_name.as_str())
    }

    /// Left join on currency code. A code shared by several countries yields one
    /// row per country; an unknown code yields a single row with no names.
    pub fn join(&self, records: &[PriceRecord]) -> Vec<MergedRecord> {
        let mut merged = Vec::with_capacity(records.len());
        for record in records {
            match self.by_code.get(&record.currency_code) {
                Some(infos) => merged.extend(infos.iter().map(|info| MergedRecord {
                    record: record.clone(),
                    currency_name: Some(info.currency_name.clone()),
                    country: Some(info.country.clone()),
                })),
                None => merged.push(MergedRecord {
                    record: record.clone(),
                    currency_name: None,
                    country: None,
                }),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_table() -> PriceTable {
        PriceTable::new(vec![
            PriceRecord::new(date(2023, 7, 1), "USD", 5.58, 1.0, 5.58),
            PriceRecord::new(date(2023, 7, 1), "GBP", 4.19, 0.78, 5.37),
            PriceRecord::new(date(2000, 4, 1), "USD", 2.51, 1.0, 2.51),
            PriceRecord::new(date(2000, 4, 1), "GBP", 1.9, 0.63, 3.0),
            PriceRecord::new(date(2011, 7, 28), "JPY", 320.0, 78.4, 4.08),
        ])
    }

    #[test]
    fn test_date_labels_are_chronological_and_distinct() {
        let table = sample_table();
        assert_eq!(table.date_labels(), &["Apr 2000", "Jul 2011", "Jul 2023"]);
        assert_eq!(table.latest_label(), Some("Jul 2023"));
    }

    #[test]
    fn test_every_label_filters_to_non_empty_matching_slice() {
        let table = sample_table();
        for label in table.date_labels() {
            let slice = table.filter(&DateSelector::Label(label.clone()));
            assert!(!slice.is_empty());
            assert!(slice.iter().all(|r| &r.date_label == label));
        }
    }

    #[test]
    fn test_filter_by_exact_date() {
        let table = sample_table();
        let slice = table.filter(&DateSelector::parse("2000-04-01"));
        assert_eq!(slice.len(), 2);
        assert!(slice.iter().all(|r| r.date == date(2000, 4, 1)));
    }

    #[test]
    fn test_unknown_date_filters_to_empty() {
        let table = sample_table();
        assert!(table.filter(&DateSelector::parse("Jan 1999")).is_empty());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(DateSelector::parse(" 2023-07-01 "), DateSelector::Exact(date(2023, 7, 1)));
        assert_eq!(DateSelector::parse("Jul 2023"), DateSelector::Label("Jul 2023".to_string()));
        assert_eq!(DateSelector::parse("2023-07-01").label(), "Jul 2023");
    }

    #[test]
    fn test_left_join_keeps_unknown_codes() {
        let reference = CurrencyReference::new(vec![CurrencyInfo {
            currency_code: "GBP".to_string(),
            currency_name: "Pound Sterling".to_string(),
            country: "UNITED KINGDOM (THE)".to_string(),
        }]);
        let table = sample_table();
        let slice = table.filter(&DateSelector::Label("Jul 2023".to_string()));

        let merged = reference.join(&slice);
        assert_eq!(merged.len(), 2);

        let usd = merged.iter().find(|m| m.record.currency_code == "USD").unwrap();
        assert_eq!(usd.currency_name, None);
        assert_eq!(usd.country, None);

        let gbp = merged.iter().find(|m| m.record.currency_code == "GBP").unwrap();
        assert_eq!(gbp.currency_name.as_deref(), Some("Pound Sterling"));
    }

    #[test]
    fn test_join_repeats_shared_codes() {
        let euro = |country: &str| CurrencyInfo {
            currency_code: "EUR".to_string(),
            currency_name: "Euro".to_string(),
            country: country.to_string(),
        };
        let reference = CurrencyReference::new(vec![euro("FRANCE"), euro("GERMANY")]);
        let records = vec![PriceRecord::new(date(2023, 7, 1), "EUR", 5.28, 0.9, 5.8)];

        let merged = reference.join(&records);
        assert_eq!(merged.len(), 2);
        assert_eq!(reference.len(), 2);
        assert_eq!(reference.currency_name("EUR"), Some("Euro"));
    }
}
