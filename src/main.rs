//! Breadth-Crawl main entry point
//!
//! This is the command-line interface for the breadth-first crawler.

use anyhow::Context;
use breadth_crawl::config::{prompt_inputs, CrawlConfig, RawInputs};
use breadth_crawl::crawler::Crawler;
use breadth_crawl::output::print_report;
use breadth_crawl::ConfigError;
use clap::Parser;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Breadth-Crawl: a concurrent breadth-first web crawler
///
/// Crawls outward from a start URL up to a maximum depth, fetching pages on
/// a fixed number of worker threads. When no URL is given, the inputs are
/// read interactively.
#[derive(Parser, Debug)]
#[command(name = "breadth-crawl")]
#[command(version)]
#[command(about = "A concurrent breadth-first web crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from (prompted for when omitted)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Maximum crawl depth (default 2; invalid values fall back to it)
    #[arg(short, long, value_name = "N")]
    depth: Option<String>,

    /// Number of worker threads (default 4; invalid values fall back to it)
    #[arg(short, long, value_name = "N")]
    threads: Option<String>,

    /// Per-request fetch timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Print the full crawl report as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let raw = match cli.url {
        Some(url) => RawInputs {
            url,
            depth: cli.depth,
            threads: cli.threads,
        },
        None => prompt_inputs(io::stdin().lock(), io::stdout())?,
    };

    let config = match CrawlConfig::from_inputs(&raw.url, raw.depth.as_deref(), raw.threads.as_deref())
    {
        Ok(config) => config.with_fetch_timeout(Duration::from_secs(cli.timeout)),
        Err(ConfigError::EmptyStartUrl) => {
            tracing::error!("URL cannot be empty. Exiting.");
            anyhow::bail!(ConfigError::EmptyStartUrl);
        }
        Err(e) => return Err(e).context("Invalid crawl input"),
    };

    // One runtime worker thread per pool slot
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.threads)
        .thread_name("crawl-worker")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(handle_crawl(config, cli.json))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("breadth_crawl=info,warn"),
            1 => EnvFilter::new("breadth_crawl=debug,info"),
            2 => EnvFilter::new("breadth_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig, json: bool) -> anyhow::Result<()> {
    println!(
        "Starting crawl with depth {} and {} threads...",
        config.max_depth, config.threads
    );

    let crawler = Crawler::with_http(config).context("Failed to set up crawler")?;
    let report = match crawler.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    println!("Time taken: {}ms", report.elapsed_ms);
    Ok(())
}
