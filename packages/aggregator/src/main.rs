use std::io::IsTerminal;

use clap::Parser;
use tracing::{error, warn};

use attestscope_aggregator::config::Settings;
use attestscope_aggregator::report::{render_table, to_json, write_debug_dump};
use attestscope_aggregator::telemetry::{init_tracing, DEFAULT_LOG_FILTER};
use attestscope_aggregator::{fetch_article_aggregates, ExplorerClient, PayloadLayout};

/// Per-article feedback totals from on-chain attestations
#[derive(Parser, Debug)]
#[command(name = "attestscope", version, about)]
struct Cli {
    /// Settings file (TOML); defaults to ./attestscope.toml if present
    #[arg(long)]
    config: Option<String>,

    /// Write the aggregates as JSON to this file
    #[arg(long)]
    dump: Option<String>,

    /// Print the aggregates as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(DEFAULT_LOG_FILTER);
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path, true)?,
        None => Settings::new()?,
    };
    if settings.explorer.api_key.is_empty() {
        warn!("No explorer API key configured; requests may be rate limited");
    }

    let client = ExplorerClient::new(settings.explorer.clone())?;
    let aggregates = fetch_article_aggregates(&client, &PayloadLayout::V1).await;

    let interactive = std::io::stdout().is_terminal();
    if cli.dump.is_some() || !interactive {
        let path = cli.dump.as_deref().unwrap_or(&settings.dump_path);
        if let Err(e) = write_debug_dump(path, &aggregates) {
            error!("Failed to write debug dump: {}", e);
        }
    }

    if cli.json {
        println!("{}", to_json(&aggregates)?);
    } else {
        print!("{}", render_table(&aggregates));
    }

    Ok(())
}
