pub mod earnings;
pub mod report;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::events::{self, EventRecord};
use crate::positions::{self, PositionRecord};
use crate::reference::{self, ReferenceTable};

/// Read the broker earnings report, CSV or XLSX by extension.
pub fn read_events(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("xlsx") => events::read_xlsx(path),
        _ => events::read_csv(open(path)?),
    }
    .with_context(|| format!("failed to read earnings report {}", path.display()))
}

/// Read the broker negotiation report, CSV or XLSX by extension.
pub fn read_positions(path: &Path) -> anyhow::Result<Vec<PositionRecord>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("xlsx") => positions::read_xlsx(path),
        _ => positions::read_csv(open(path)?),
    }
    .with_context(|| format!("failed to read negotiation report {}", path.display()))
}

/// Read the product registry, CSV or XLSX by extension.
pub fn read_reference(path: &Path) -> anyhow::Result<ReferenceTable> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("xlsx") => reference::read_xlsx(path),
        _ => reference::read_csv(open(path)?),
    }
    .with_context(|| format!("failed to read product registry {}", path.display()))
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Serialize records as CSV to any sink.
pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: std::io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
