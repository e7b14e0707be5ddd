// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one command: crawl ROOT_URL and report what's broken. Everything
// else is a flag that feeds CheckerConfig or the logging/report setup.
// =============================================================================

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "check-links",
    version,
    about = "Crawl a website, find broken links and catalog its internal assets",
    long_about = "check-links starts at ROOT_URL, crawls every reachable page below it, checks that \
                  every link, image, stylesheet and script resolves, and prints a report of broken \
                  internal and external links plus an inventory of internal assets by type."
)]
pub struct Cli {
    /// Page to start crawling from; only pages under its path are crawled
    pub root_url: String,

    /// Increase console verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write log records to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Minimum level written to the log file
    #[arg(long, value_enum, ignore_case = true, default_value = "debug")]
    pub log_level: LogLevel,

    /// File of path patterns; matching assets are left out of the catalog
    #[arg(long)]
    pub ignore_asset_url_file: Option<PathBuf>,

    /// File of path patterns; matching internal pages are checked but not crawled
    #[arg(long)]
    pub ignore_internal_url_file: Option<PathBuf>,

    /// File of URL patterns; matching external links are not checked at all
    #[arg(long)]
    pub ignore_external_links_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Stop after this many requests
    #[arg(long)]
    pub max_requests: Option<usize>,

    /// Don't crawl pages more than this many links away from the root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Pause between two requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when any broken link was found
    #[arg(long)]
    pub fail_on_broken: bool,
}

/// Log levels accepted by --log-level
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    #[value(alias = "warn")]
    Warning,
    Error,
    /// Same as error
    Critical,
}
