//! Earnings command - aggregated income per product

use std::io;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd;
use crate::earnings::{aggregate_earnings, ProductEarnings};

#[derive(Args, Debug)]
pub struct EarningsCommand {
    /// Earnings (proventos) report from the broker, CSV or XLSX
    #[arg(short, long)]
    earnings: PathBuf,

    /// Filter by product code (e.g. PETR4)
    #[arg(short, long)]
    product: Option<String>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl EarningsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let events = cmd::read_events(&self.earnings)?;
        let earnings = aggregate_earnings(&events);

        let rows: Vec<EarningsRow> = earnings
            .sorted()
            .into_iter()
            .filter(|(code, _)| {
                self.product
                    .as_deref()
                    .is_none_or(|product| code.eq_ignore_ascii_case(product))
            })
            .map(|(code, totals)| EarningsRow::new(code, totals))
            .collect();

        if self.json {
            self.print_json(&rows)
        } else if self.csv {
            cmd::write_csv(&rows, io::stdout())
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[EarningsRow]) {
        if rows.is_empty() {
            println!("No income events found matching filters");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn print_json(&self, rows: &[EarningsRow]) -> anyhow::Result<()> {
        let output = EarningsOutput {
            product_count: rows.len(),
            products: rows.to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct EarningsRow {
    #[tabled(rename = "Produto")]
    #[serde(rename = "produto")]
    product: String,

    #[tabled(rename = "Rendimento")]
    #[serde(rename = "rendimento")]
    income: String,

    #[tabled(rename = "JSCP")]
    #[serde(rename = "juros_sobre_capital_proprio")]
    equity_interest: String,

    #[tabled(rename = "Dividendo")]
    #[serde(rename = "dividendo")]
    dividend: String,

    #[tabled(rename = "Total")]
    #[serde(rename = "total")]
    total: String,
}

impl EarningsRow {
    fn new(code: &str, totals: &ProductEarnings) -> EarningsRow {
        EarningsRow {
            product: code.to_string(),
            income: format!("{:.2}", totals.income),
            equity_interest: format!("{:.2}", totals.equity_interest),
            dividend: format!("{:.2}", totals.dividend),
            total: format!("{:.2}", totals.total()),
        }
    }
}

#[derive(Debug, Serialize)]
struct EarningsOutput {
    product_count: usize,
    products: Vec<EarningsRow>,
}
