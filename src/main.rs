use clap::Parser;

mod assets;
mod classify;
mod cmd;
mod earnings;
mod events;
mod positions;
mod reference;
mod spreadsheet;

/// Bens e Direitos statement calculator for B3 brokerage records
#[derive(Parser, Debug)]
#[command(name = "irpfc", version, about)]
enum Command {
    /// Build the assets-and-rights statement
    Report(cmd::report::ReportCommand),
    /// Show aggregated earnings per product
    Earnings(cmd::earnings::EarningsCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Command::parse() {
        Command::Report(cmd) => cmd.exec(),
        Command::Earnings(cmd) => cmd.exec(),
    }
}
