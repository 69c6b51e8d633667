//! Command-line interface for fetching 10-K income statements from XBRL US.
//!
//! Credentials come from the environment (or a `.env` file):
//! `CLIENT_ID`, `CLIENT_SECRET`, `XBRL_USERNAME`, `XBRL_PASSWORD`.

use clap::Parser;
use polars::prelude::*;
use std::cmp::Reverse;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xbrlus::{
    ApiGateway, Company, Credentials, Report, StatementType, Ticker, TokenSession,
    concepts_to_dataframe, facts_to_dataframe, to_dataframe,
};

#[derive(Parser)]
#[command(name = "xbrlus")]
#[command(about = "Fetch 10-K income statements from the XBRL US API", long_about = None)]
#[command(version)]
struct Cli {
    /// Comma-delimited ticker symbols, e.g. BA,CAT
    #[arg(long, value_delimiter = ',', required = true)]
    tickers: Vec<String>,

    /// Comma-delimited fiscal years to fetch
    #[arg(long, value_delimiter = ',', default_value = "2024")]
    years: Vec<i32>,

    /// Directory the CSV files are written to
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Also write the raw concept and fact rows per statement
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.output)?;

    let credentials = Credentials::new(
        env_var("CLIENT_ID")?,
        env_var("CLIENT_SECRET")?,
        env_var("XBRL_USERNAME")?,
        env_var("XBRL_PASSWORD")?,
        "rust",
    );
    let session = TokenSession::connect(credentials).await?;
    let gateway = ApiGateway::new(session);

    for symbol in &cli.tickers {
        let ticker = Ticker::new(symbol);
        let mut company = Company::new(ticker.clone());

        match company.load_annual_reports(&gateway, &cli.years).await {
            Ok(count) => {
                if count == 0 {
                    println!("{ticker}: no 10-K reports found for {:?}", cli.years);
                    continue;
                }
            }
            Err(e) => {
                // One company failing never aborts the rest of the run.
                error!(%ticker, error = %e, "report search failed, skipping company");
                continue;
            }
        }

        let mut reports: Vec<&mut Report> = company.reports_mut().collect();
        reports.sort_by_key(|r| Reverse(r.fiscal_year()));

        for report in reports {
            report
                .load_statement(&gateway, StatementType::IncomeStatement)
                .await;
            let Some(statement) = report.statement(StatementType::IncomeStatement) else {
                println!(
                    "{ticker} {}: income statement unavailable",
                    report.fiscal_year()
                );
                continue;
            };

            let year = report.fiscal_year();
            let mut df = to_dataframe(&statement.assemble())?;
            let path = csv_path(&cli.output, &ticker, year, "income_statement");
            write_csv(&path, &mut df)?;
            println!(
                "{ticker} {year}: wrote {} statement lines to {}",
                df.height(),
                path.display()
            );

            if cli.raw {
                let mut concepts = concepts_to_dataframe(statement.concepts())?;
                write_csv(&csv_path(&cli.output, &ticker, year, "concepts"), &mut concepts)?;
                let mut facts = facts_to_dataframe(statement.facts())?;
                write_csv(&csv_path(&cli.output, &ticker, year, "facts"), &mut facts)?;
            }
        }
    }

    info!("done");
    Ok(())
}

fn env_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("missing environment variable {name}"))
}

fn csv_path(dir: &Path, ticker: &Ticker, year: i32, suffix: &str) -> PathBuf {
    dir.join(format!("{ticker}_{year}_{suffix}.csv"))
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}
