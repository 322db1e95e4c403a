mod batch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mailsift_core::AppConfig;
use mailsift_export::OutputDir;
use mailsift_scraper::{BatchProcessor, FetchOptions, PageFetcher};

#[derive(Debug, Parser)]
#[command(name = "mailsift")]
#[command(about = "Scan web pages for email addresses")]
struct Cli {
    /// Skip TLS certificate verification (reaches sites with broken certificates).
    #[arg(long, global = true)]
    insecure: bool,

    /// Per-request timeout in seconds (overrides MAILSIFT_FETCH_TIMEOUT_SECS).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one URL and print the addresses found, one per line.
    Scrape { url: String },
    /// Scrape many URLs, isolating failures, and optionally export a spreadsheet.
    Batch {
        urls: Vec<String>,
        /// Newline-separated file of URLs, read after any positional URLs.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Write the results to a spreadsheet in the output directory.
        #[arg(long)]
        export: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = apply_overrides(mailsift_core::load_app_config()?, &cli);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let fetcher = PageFetcher::new(&FetchOptions::from_app_config(&config))?;
    let processor = BatchProcessor::new(fetcher, config.max_concurrent_fetches);

    match cli.command {
        Commands::Scrape { url } => {
            for email in processor.scrape_url(&url).await? {
                println!("{email}");
            }
        }
        Commands::Batch { urls, file, export } => {
            let output = if export {
                Some(OutputDir::init(&config.output_dir)?)
            } else {
                None
            };
            batch::run(&processor, urls, file.as_deref(), output.as_ref()).await?;
        }
    }

    Ok(())
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if cli.insecure {
        config.accept_invalid_certs = true;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch_timeout_secs = timeout;
    }
    config
}
