mod archive;
mod config;
mod privatbank;

use crate::archive::{persist, RateRecord};
use crate::config::Config;
use crate::privatbank::pull_rates;
use clap::Parser;
use prettytable::{row, Table};
use tracing::{info, span, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let _span = span!(Level::INFO, "main").entered();

    let config = Config::parse();
    config.validate()?;

    info!("requesting exchange rates for the last {} days...", config.days);

    let records = match pull_rates(&config).await {
        Ok(records) => records,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    persist(&records, &config.output)?;
    info!("saved {} records to {}", records.len(), config.output.display());

    print_table(&records);

    Ok(())
}

fn print_table(records: &[RateRecord]) {
    let mut table = Table::new();

    table.add_row(row![
        "Date",
        "EUR sale",
        "EUR purchase",
        "USD sale",
        "USD purchase",
    ]);

    for record in records {
        table.add_row(row![
            record.date,
            record.quotes.eur.sale,
            record.quotes.eur.purchase,
            record.quotes.usd.sale,
            record.quotes.usd.purchase,
        ]);
    }

    table.printstd();
}
