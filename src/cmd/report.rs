//! Report command - the full Bens e Direitos statement

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::assets::{self, AssetRow};
use crate::classify;
use crate::cmd;
use crate::earnings::aggregate_earnings;

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Earnings (proventos) report from the broker, CSV or XLSX
    #[arg(short, long)]
    earnings: PathBuf,

    /// Negotiation report with held positions, CSV or XLSX
    #[arg(short, long)]
    positions: PathBuf,

    /// Product registry with CNPJ and kind per ticker, CSV or XLSX
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Write the statement as CSV to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output as CSV to stdout instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let events = cmd::read_events(&self.earnings)?;
        let positions = cmd::read_positions(&self.positions)?;
        let reference = match &self.reference {
            Some(path) => {
                let table = cmd::read_reference(path)?;
                log::info!("product registry has {} tickers", table.len());
                Some(table)
            }
            None => None,
        };

        let earnings = aggregate_earnings(&events);
        log::info!(
            "aggregated {} events into earnings for {} products",
            events.len(),
            earnings.len()
        );

        let rows = assets::assets_and_rights(
            &positions,
            &earnings,
            reference.as_ref(),
            classify::classify,
        );
        log::info!(
            "{} of {} positions carry a reportable balance",
            rows.len(),
            positions.len()
        );

        if let Some(path) = &self.output {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            cmd::write_csv(&rows, file)?;
            println!("Wrote {} statement rows to {}", rows.len(), path.display());
            Ok(())
        } else if self.csv {
            cmd::write_csv(&rows, io::stdout())
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[AssetRow]) {
        if rows.is_empty() {
            println!("No positions with a reportable balance");
            return;
        }

        let table_rows: Vec<StatementRow> = rows.iter().map(StatementRow::from).collect();
        let table = Table::new(table_rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let total: Decimal = rows.iter().map(|row| row.final_position).sum();
        println!();
        println!(
            "Posições: {} | Situação final total: {}",
            rows.len(),
            format_brl(total)
        );
    }
}

#[derive(Debug, Clone, Tabled)]
struct StatementRow {
    #[tabled(rename = "Grupo")]
    group: String,
    #[tabled(rename = "Código")]
    code: String,
    #[tabled(rename = "CNPJ")]
    cnpj: String,
    #[tabled(rename = "Discriminação")]
    description: String,
    #[tabled(rename = "Situação final")]
    final_position: String,
    #[tabled(rename = "JSCP")]
    equity_interest: String,
    #[tabled(rename = "Dividendo")]
    dividend: String,
    #[tabled(rename = "Rendimento")]
    income: String,
}

impl From<&AssetRow> for StatementRow {
    fn from(row: &AssetRow) -> Self {
        StatementRow {
            group: row.group.clone(),
            code: row.code.clone(),
            cnpj: row.cnpj.clone(),
            description: row.description.clone(),
            final_position: format_brl(row.final_position),
            equity_interest: format_brl(row.equity_interest),
            dividend: format_brl(row.dividend),
            income: format_brl(row.income),
        }
    }
}

fn format_brl(amount: Decimal) -> String {
    format!("R$ {:.2}", amount)
}
