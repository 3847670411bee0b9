//! Broker negotiation/position report rows.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::spreadsheet::{self, Sheet};

/// Row of the broker negotiation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(rename = "Código de Negociação")]
    pub trading_code: String,
    #[serde(rename = "Instituição")]
    pub institution: String,
    #[serde(rename = "Quantidade (Líquida)")]
    pub net_quantity: Decimal,
    #[serde(rename = "Preço Médio (Compra)")]
    pub average_buy_price: Decimal,
}

/// Fractional-market codes carry a trailing "F" (PETR4F trades the same
/// underlying as PETR4). Strip exactly one suffix to get the join key.
pub fn join_key(trading_code: &str) -> &str {
    trading_code.strip_suffix('F').unwrap_or(trading_code)
}

pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<PositionRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<PositionRecord>, _> = rdr.deserialize::<PositionRecord>().collect();
    Ok(records?)
}

pub fn read_xlsx(path: &Path) -> anyhow::Result<Vec<PositionRecord>> {
    let sheet = Sheet::open(path)?;
    let trading_code = sheet.column("Código de Negociação")?;
    let institution = sheet.column("Instituição")?;
    let net_quantity = sheet.column("Quantidade (Líquida)")?;
    let average_buy_price = sheet.column("Preço Médio (Compra)")?;

    let mut records = Vec::new();
    for (idx, row) in sheet.rows().enumerate() {
        let record = PositionRecord {
            trading_code: spreadsheet::cell_str(row, trading_code)
                .with_context(|| format!("row {}: missing trading code", idx + 2))?,
            institution: spreadsheet::cell_str(row, institution).unwrap_or_default(),
            net_quantity: spreadsheet::cell_decimal(row, net_quantity)
                .with_context(|| format!("row {}: net quantity", idx + 2))?,
            average_buy_price: spreadsheet::cell_decimal(row, average_buy_price)
                .with_context(|| format!("row {}: average buy price", idx + 2))?,
        };
        records.push(record);
    }
    Ok(records)
}
