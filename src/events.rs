//! Broker earnings (proventos) report rows.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::spreadsheet::{self, Sheet};

/// Income event categories recognized on the earnings report.
///
/// Matching is exact and case-sensitive against the "Tipo de Evento"
/// column; every other movement type is ignored by the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// "Rendimento" - fund yields and similar distributions
    Income,
    /// "Juros Sobre Capital Próprio"
    EquityInterest,
    /// "Dividendo"
    Dividend,
}

impl EventCategory {
    pub fn from_label(label: &str) -> Option<EventCategory> {
        match label {
            "Rendimento" => Some(EventCategory::Income),
            "Juros Sobre Capital Próprio" => Some(EventCategory::EquityInterest),
            "Dividendo" => Some(EventCategory::Dividend),
            _ => None,
        }
    }
}

/// Row of the broker earnings report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Tipo de Evento")]
    pub event_type: String,
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Valor líquido")]
    pub net_value: Decimal,
}

/// Product code is the label prefix before the first " - " separator,
/// e.g. "PETR4 - PETROBRAS PN" -> "PETR4". A label without the
/// separator is taken whole.
pub fn product_code(label: &str) -> &str {
    label.split(" - ").next().unwrap_or(label)
}

pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<EventRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<EventRecord>, _> = rdr.deserialize::<EventRecord>().collect();
    Ok(records?)
}

pub fn read_xlsx(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let sheet = Sheet::open(path)?;
    let event_type = sheet.column("Tipo de Evento")?;
    let product = sheet.column("Produto")?;
    let net_value = sheet.column("Valor líquido")?;

    let mut records = Vec::new();
    for (idx, row) in sheet.rows().enumerate() {
        let record = EventRecord {
            event_type: spreadsheet::cell_str(row, event_type).unwrap_or_default(),
            product: spreadsheet::cell_str(row, product)
                .with_context(|| format!("row {}: missing product", idx + 2))?,
            net_value: spreadsheet::cell_decimal(row, net_value)
                .with_context(|| format!("row {}: net value", idx + 2))?,
        };
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn product_code_strips_free_text() {
        assert_eq!(product_code("ABC - Some description"), "ABC");
        assert_eq!(product_code("PETR4 - PETROBRAS - PN"), "PETR4");
    }

    #[test]
    fn product_code_without_separator_is_whole_label() {
        assert_eq!(product_code("XYZ"), "XYZ");
    }

    #[test]
    fn category_match_is_exact_and_case_sensitive() {
        assert_eq!(
            EventCategory::from_label("Dividendo"),
            Some(EventCategory::Dividend)
        );
        assert_eq!(
            EventCategory::from_label("Juros Sobre Capital Próprio"),
            Some(EventCategory::EquityInterest)
        );
        assert_eq!(
            EventCategory::from_label("Rendimento"),
            Some(EventCategory::Income)
        );
        assert_eq!(EventCategory::from_label("dividendo"), None);
        assert_eq!(EventCategory::from_label("DIVIDENDO"), None);
        assert_eq!(EventCategory::from_label("Aluguel"), None);
        assert_eq!(EventCategory::from_label(""), None);
    }

    #[test]
    fn parse_csv_events() {
        let csv_data = "Tipo de Evento,Produto,Valor líquido\n\
                        Dividendo,ABC - COMPANHIA ABC,10.50\n\
                        Aluguel,ABC - COMPANHIA ABC,1.23";

        let events = read_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "Dividendo");
        assert_eq!(events[0].product, "ABC - COMPANHIA ABC");
        assert_eq!(events[0].net_value, dec!(10.50));
        assert_eq!(events[1].event_type, "Aluguel");
    }

    #[test]
    fn malformed_net_value_is_fatal() {
        let csv_data = "Tipo de Evento,Produto,Valor líquido\n\
                        Dividendo,ABC - COMPANHIA ABC,abc";
        assert!(read_csv(csv_data.as_bytes()).is_err());
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv_data = "Tipo de Evento,Produto\nDividendo,ABC - COMPANHIA ABC";
        assert!(read_csv(csv_data.as_bytes()).is_err());
    }
}
