//! fsn-scraper CLI
//!
//! Reads an ordered list of product identifiers from a CSV file, scrapes one
//! product page per identifier, and writes the aggregated records to a CSV
//! export. A mid-batch failure aborts the run without writing an export.

use clap::Parser;
use fsn_scraper::{
    BatchOrchestrator, BatchStatus, ChromeFactory, LogSink, RetryPolicy, ScrapeConfig,
    SessionOptions, export, input,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fsn-scraper")]
#[command(version)]
#[command(about = "Batch scraper for Flipkart product pages", long_about = None)]
struct Cli {
    /// CSV file with the product identifiers to scrape
    input: PathBuf,

    /// Name of the identifier column in the input file
    #[arg(long, default_value = input::DEFAULT_ID_COLUMN)]
    id_column: String,

    /// Output CSV path (default: flipkart_data_<timestamp>.csv)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Wait attempts per element lookup
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Seconds to pause between a reload and the next lookup attempt
    #[arg(long, default_value_t = 2)]
    retry_delay: u64,

    /// Product URL prefix the identifier is appended to as ?pid=
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Also dump the records as JSON to stdout on success
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let identifiers = match input::read_identifiers_from_path(&cli.input, &cli.id_column) {
        Ok(identifiers) => identifiers,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    eprintln!("Loaded {} identifiers from {}", identifiers.len(), cli.input.display());

    let mut config = ScrapeConfig {
        retry: RetryPolicy {
            max_attempts: cli.max_attempts,
            delay: Duration::from_secs(cli.retry_delay),
            ..RetryPolicy::default()
        },
        ..ScrapeConfig::default()
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let factory = ChromeFactory::new(SessionOptions::default().headless(!cli.headed));
    let orchestrator = BatchOrchestrator::new(factory, config).with_sink(Box::new(LogSink));

    let result = orchestrator.run(&identifiers);

    match result.status {
        BatchStatus::Aborted { identifier, reason } => {
            eprintln!(
                "Batch aborted at product {}: {} ({} of {} records gathered, nothing exported)",
                identifier,
                reason,
                result.records.len(),
                identifiers.len()
            );
            ExitCode::FAILURE
        }
        BatchStatus::Completed => {
            log::info!("Data scraping completed successfully.");

            if cli.json {
                match serde_json::to_string_pretty(&result.records) {
                    Ok(json) => println!("{}", json),
                    Err(err) => eprintln!("Failed to serialize records: {}", err),
                }
            }

            let output = cli.output.unwrap_or_else(default_output_path);
            if let Err(err) = export::export_to_path(&result.records, &output) {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            }
            println!("CSV file exported to: {}", output.display());
            ExitCode::SUCCESS
        }
    }
}

fn default_output_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y_%m_%d_%H_%M_%S");
    PathBuf::from(format!("flipkart_data_{}.csv", timestamp))
}
