use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod shared;
mod domain;
mod ports;
mod infrastructure;
mod services;
mod presentation;

use shared::config::{Config, Overrides};
use shared::result::Result;
use infrastructure::http::ReqwestFetcher;
use infrastructure::markup::MarkerScanner;
use presentation::dto::{ProfileDto, ReportDto};
use services::counters::CrawlCounters;
use services::paginator::PaginatedCollector;


#[derive(Parser, Debug)]
#[clap(name = "gitcrawl")]
#[clap(version)]
#[clap(about = "Crawl a user's public repositories and count unique commits across branches")]
pub struct Args {
    /// The account whose repositories are crawled
    #[clap(short, long)]
    username: String,

    /// Configuration file (defaults to gitcrawl.toml in the working directory)
    #[clap(short, long, value_parser, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Site root to crawl
    #[clap(long, value_name = "URL")]
    base_url: Option<String>,

    /// Concurrent fetches
    #[clap(short, long)]
    workers: Option<usize>,

    /// Page ceiling per paginated listing
    #[clap(long)]
    max_pages: Option<usize>,

    /// Skip repositories that fail instead of aborting
    #[clap(long)]
    skip_failed: bool,

    /// Count unique commits as the exact union of all branches
    #[clap(long)]
    exact: bool,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,

    /// Debug logging
    #[clap(short, long)]
    verbose: bool,

    /// Summarize the profile contribution calendar instead of crawling
    #[clap(long)]
    profile: bool,
}


#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志，输出到 stderr
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 加载配置
    let config = Config::from_args_and_file(
        args.config.as_deref(),
        Overrides {
            base_url: args.base_url.clone(),
            workers: args.workers,
            max_pages: args.max_pages,
            skip_failed: args.skip_failed,
            exact: args.exact,
        },
    )?;
    let config = Arc::new(config);
    debug!("Configuration loaded: {:?}", config);

    let fetcher = Arc::new(ReqwestFetcher::new(&config.source)?);
    let extractor = Arc::new(MarkerScanner::new(config.markers.clone()));
    let counters = Arc::new(CrawlCounters::new());
    let collector = Arc::new(PaginatedCollector::new(
        &config,
        fetcher,
        extractor,
        counters.clone(),
    ));

    if args.profile {
        info!("Reading contribution calendar for {}", args.username);
        let profile = services::profile::ProfileScraper::new(collector)
            .scrape_profile(&args.username)
            .await?;
        let dto = ProfileDto::from(profile);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&dto)?);
        } else {
            print!("{}", presentation::report::render_profile(&dto));
        }
        return Ok(());
    }

    info!("Starting crawl for {} from {}", args.username, config.source.base_url);
    let crawler = services::crawler::Crawler::new(config.clone(), counters, collector);
    let result = crawler.crawl(&args.username).await?;

    let summary = services::aggregate::summarize(&result, config.crawl.dedup);
    let report = ReportDto::new(&result, summary, config.crawl.dedup);
    info!(
        "Crawl finished: {} repositories, {} skipped, {} pages",
        report.repositories.len(),
        report.skipped.len(),
        report.stats.pages_fetched
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", presentation::report::render_report(&report));
    }

    Ok(())
}
