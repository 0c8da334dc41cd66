//! PubSweep command-line entry point

use clap::Parser;
use pubsweep::config::{load_config, Config};
use pubsweep::crawler;
use pubsweep::output::write_records;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PubSweep: a polite PubMed literature scraper
///
/// Searches PubMed for the given keywords within a publication-year
/// range, follows every result to its detail page, and writes the
/// extracted records as JSON.
#[derive(Parser, Debug)]
#[command(name = "pubsweep")]
#[command(about = "Scrape PubMed search results into JSON records", long_about = None)]
struct Cli {
    /// Search keywords, in the order they should appear in the query
    #[arg(value_name = "KEYWORD", required = true)]
    keywords: Vec<String>,

    /// First year of the publication-date filter
    #[arg(long, value_name = "YEAR")]
    from: String,

    /// Last year of the publication-date filter
    #[arg(long, value_name = "YEAR")]
    to: String,

    /// Maximum number of listing pages to visit
    #[arg(long, default_value_t = 5)]
    pages: u32,

    /// Path to a TOML configuration file (defaults are used without one)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            load_config(path)?
        }
        None => {
            let mut config = Config::default();
            config.normalize();
            config
        }
    };

    tracing::info!(
        "Searching for {:?}, years {}-{}, up to {} page(s)",
        cli.keywords,
        cli.from,
        cli.to,
        cli.pages
    );

    let records = crawler::crawl(&config, &cli.keywords, &cli.from, &cli.to, cli.pages).await?;
    tracing::info!("Extracted {} record(s)", records.len());

    write_records(&records, cli.output.as_deref())?;

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pubsweep=info,warn"),
            1 => EnvFilter::new("pubsweep=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .init();
}
