//! Spreadsheet input for B3 exports.
//!
//! B3 reports come as XLSX with a header row naming each column. Columns
//! are located by header name; a missing expected column aborts the run.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("workbook has no worksheets")]
    NoWorksheet,
    #[error("worksheet has no header row")]
    NoHeader,
    #[error("missing expected column \"{0}\"")]
    MissingColumn(String),
}

/// First worksheet of an XLSX file, header row mapped by column name.
pub struct Sheet {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn open(path: &Path) -> anyhow::Result<Sheet> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)?
            .with_context(|| format!("failed to read {}", path.display()))?;

        let mut raw_rows = range.rows();
        let header = raw_rows.next().ok_or(SheetError::NoHeader)?;
        let columns = header
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.get_string().map(|name| (name.trim().to_string(), idx))
            })
            .collect();
        // B3 pads exports with blank trailing rows
        let rows = raw_rows
            .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .map(|row| row.to_vec())
            .collect();

        Ok(Sheet { columns, rows })
    }

    /// Index of a named column; absence is a fatal input-format error.
    pub fn column(&self, name: &str) -> Result<usize, SheetError> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::MissingColumn(name.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Data]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Non-empty text content of a cell.
pub fn cell_str(row: &[Data], col: usize) -> Option<String> {
    row.get(col)
        .and_then(|cell| cell.get_string())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Numeric content of a cell. String cells carry the Brazilian format
/// ("R$ 1.234,56") and are cleaned up before parsing.
pub fn cell_decimal(row: &[Data], col: usize) -> anyhow::Result<Decimal> {
    let cell = row.get(col).unwrap_or(&Data::Empty);
    match cell {
        Data::Int(i) => Ok(Decimal::from(*i)),
        Data::Float(f) => {
            Decimal::from_f64_retain(*f).ok_or_else(|| anyhow!("invalid number {}", f))
        }
        Data::String(s) => {
            let cleaned = s.replace("R$", "").replace('.', "").replace(',', ".");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() || cleaned == "-" {
                return Err(anyhow!("empty numeric cell"));
            }
            Decimal::from_str(cleaned).with_context(|| format!("invalid number \"{}\"", s))
        }
        other => Err(anyhow!("unsupported cell value {:?}", other)),
    }
}
