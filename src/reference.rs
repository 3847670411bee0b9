//! Product registry lookup (ticker to CNPJ and kind).

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::spreadsheet::{self, Sheet};

/// Row of the product registry table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Tipo")]
    pub kind: String,
    #[serde(rename = "CNPJ")]
    pub cnpj: String,
}

/// Registry data for one product.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    pub kind: String,
    pub cnpj: String,
}

/// Ticker lookup built from the registry table. A repeated ticker keeps
/// the last row.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    by_ticker: HashMap<String, ProductInfo>,
}

impl ReferenceTable {
    pub fn from_records(records: Vec<ReferenceRecord>) -> ReferenceTable {
        let by_ticker = records
            .into_iter()
            .map(|record| {
                (
                    record.ticker,
                    ProductInfo {
                        kind: record.kind,
                        cnpj: record.cnpj,
                    },
                )
            })
            .collect();
        ReferenceTable { by_ticker }
    }

    pub fn lookup(&self, ticker: &str) -> Option<&ProductInfo> {
        self.by_ticker.get(ticker)
    }

    pub fn len(&self) -> usize {
        self.by_ticker.len()
    }
}

pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<ReferenceTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<ReferenceRecord>, _> = rdr.deserialize::<ReferenceRecord>().collect();
    Ok(ReferenceTable::from_records(records?))
}

pub fn read_xlsx(path: &Path) -> anyhow::Result<ReferenceTable> {
    let sheet = Sheet::open(path)?;
    let ticker = sheet.column("Ticker")?;
    let kind = sheet.column("Tipo")?;
    let cnpj = sheet.column("CNPJ")?;

    let mut records = Vec::new();
    for (idx, row) in sheet.rows().enumerate() {
        let record = ReferenceRecord {
            ticker: spreadsheet::cell_str(row, ticker)
                .with_context(|| format!("row {}: missing ticker", idx + 2))?,
            kind: spreadsheet::cell_str(row, kind).unwrap_or_default(),
            cnpj: spreadsheet::cell_str(row, cnpj).unwrap_or_default(),
        };
        records.push(record);
    }
    Ok(ReferenceTable::from_records(records))
}
