// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (console, plus an optional log file)
// 3. Build and validate the crawl configuration
// 4. Crawl the site and check every link and asset
// 5. Print the report and exit (0 = done, 1 = error, 2 = broken links found
//    with --fail-on-broken)
// =============================================================================

mod checker; // src/checker/ - per-URL building blocks
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated crawl configuration
mod crawl; // src/crawl/ - the breadth-first crawl engine
mod error; // src/error.rs - setup errors
mod logging; // src/logging.rs - tracing subscriber setup
mod report; // src/report.rs - text and JSON reports

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;
use tracing::info;

use checker::HttpFetcher;
use cli::Cli;
use config::{read_patterns_file, timeout_from_secs, CheckerConfig};
use crawl::{CrawlState, Crawler, TracingObserver};
use error::CheckerError;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::setup_logging(cli.verbose, cli.log_file.as_deref(), cli.log_level)?;

    let config = build_config(&cli)?;
    info!(
        root = %config.root_url,
        timeout = ?config.timeout,
        "Starting crawl"
    );

    let fetcher = HttpFetcher::new(config.timeout)?;
    let state = Crawler::new(&config, fetcher)
        .with_observer(Box::new(TracingObserver))
        .run()
        .await;

    info!(
        requests = state.requests,
        broken = state.total_broken(),
        "Crawl finished"
    );

    write_report(&cli, &config, &state)?;

    if cli.fail_on_broken && state.total_broken() > 0 {
        return Ok(2);
    }
    Ok(0)
}

// Turns parsed arguments into a validated CheckerConfig, reading any
// ignore-pattern files along the way
fn build_config(cli: &Cli) -> Result<CheckerConfig> {
    let read = |path: &Option<std::path::PathBuf>| -> Result<Vec<String>> {
        match path {
            Some(path) => Ok(read_patterns_file(path)?),
            None => Ok(Vec::new()),
        }
    };

    let config = CheckerConfig::new(&cli.root_url)?
        .with_ignored_asset_paths(read(&cli.ignore_asset_url_file)?)
        .with_ignored_internal_paths(read(&cli.ignore_internal_url_file)?)
        .with_ignored_external_links(read(&cli.ignore_external_links_file)?)
        .with_timeout(timeout_from_secs(cli.timeout)?)
        .with_request_delay(Duration::from_millis(cli.delay_ms))
        .with_max_requests(cli.max_requests)
        .with_max_depth(cli.max_depth);

    Ok(config)
}

fn write_report(cli: &Cli, config: &CheckerConfig, state: &CrawlState) -> Result<()> {
    match &cli.output {
        Some(path) => {
            let to_error = |source| CheckerError::Output {
                path: path.clone(),
                source,
            };
            let file = File::create(path).map_err(to_error)?;
            let mut out = BufWriter::new(file);
            render(&mut out, cli.json, config, state)
                .and_then(|_| out.flush())
                .map_err(to_error)?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render(&mut out, cli.json, config, state).context("could not write report")?;
        }
    }
    Ok(())
}

fn render(out: &mut impl Write, json: bool, config: &CheckerConfig, state: &CrawlState) -> io::Result<()> {
    if json {
        report::write_json(out, config, state)
    } else {
        report::write_text(out, config, state)
    }
}
