//! Newsprint main entry point
//!
//! This is the command-line interface for the Newsprint category crawler.

use anyhow::{Context, Result};
use clap::Parser;
use newsprint::config::{hash_config, parse_config, validate, Config};
use newsprint::crawler::Crawler;
use newsprint::output::{
    load_statistics, print_run_report, print_statistics, write_all, JsonOutput, OutputHandler,
    SqliteOutputHandler,
};
use newsprint::storage::{open_storage, RunStatus, Storage};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Newsprint: a polite single-site news crawler
///
/// Newsprint walks a news category's listing pages, collects article links
/// and extracts each article into a JSON file, optionally archiving the
/// records in SQLite.
#[derive(Parser, Debug)]
#[command(name = "newsprint")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site news crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Category listing page to scrape
    #[arg(long, value_name = "URL")]
    category_url: Option<String>,

    /// Maximum listing pages to walk
    #[arg(long)]
    max_pages: Option<u32>,

    /// Maximum articles to fetch
    #[arg(long)]
    max_articles: Option<u32>,

    /// Seconds between fetch starts
    #[arg(long)]
    rate_limit_delay: Option<f64>,

    /// Origin that relative links resolve against
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// JSON file to write the articles to
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// SQLite archive to store the articles in
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the article archive and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = effective_config(&cli)?;

    if cli.stats {
        return handle_stats(&config);
    }

    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsprint=info,warn"),
            1 => EnvFilter::new("newsprint=debug,info"),
            2 => EnvFilter::new("newsprint=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the config file, if any, and applies command-line overrides
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            parse_config(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.category_url {
        config.crawler.category_url = Some(url.clone());
    }
    if let Some(pages) = cli.max_pages {
        config.crawler.max_pages = pages;
    }
    if let Some(articles) = cli.max_articles {
        config.crawler.max_articles = articles;
    }
    if let Some(delay) = cli.rate_limit_delay {
        config.crawler.rate_limit_delay = delay;
    }
    if let Some(base) = &cli.base_url {
        config.crawler.base_url = base.clone();
    }
    if let Some(output) = &cli.output {
        config.output.json_path = output.clone();
    }
    if let Some(database) = &cli.database {
        config.output.database_path = Some(database.clone());
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("=== Newsprint Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Category URL: {}",
        config.crawler.category_url.as_deref().unwrap_or("-")
    );
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max articles: {}", config.crawler.max_articles);
    println!("  Rate limit delay: {}s", config.crawler.rate_limit_delay);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Respect robots.txt: {}", config.crawler.respect_robots_txt);

    println!("\nRequest Headers:");
    println!("  User-Agent: {}", config.user_agent.user_agent);
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nOutput:");
    println!("  JSON: {}", config.output.json_path);
    println!(
        "  Database: {}",
        config.output.database_path.as_deref().unwrap_or("(none)")
    );

    println!("\nSelectors:");
    for (field, strategy) in config.selectors.entries() {
        println!("  {}: {:?}", field, strategy);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --stats mode: shows statistics from the archive
fn handle_stats(config: &Config) -> Result<()> {
    let path = config
        .output
        .database_path
        .as_deref()
        .context("--stats needs a database (set output.database-path or --database)")?;

    println!("Database: {}\n", path);

    let storage = open_storage(Path::new(path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<()> {
    let category_url = config
        .crawler
        .category_url
        .as_deref()
        .context("No category URL configured")?;

    let archive = match &config.output.database_path {
        Some(path) => {
            let hash = hash_config(config)?;
            let mut storage = open_storage(Path::new(path))?;
            let run_id = storage.create_run(&hash, category_url)?;
            tracing::info!("Archiving to {} as run {}", path, run_id);
            Some(SqliteOutputHandler::new(
                Arc::new(Mutex::new(storage)),
                run_id,
            ))
        }
        None => None,
    };

    let crawler = match Crawler::new(config) {
        Ok(crawler) => Arc::new(crawler),
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            if let Some(archive) = &archive {
                archive.finalize(RunStatus::Failed)?;
            }
            return Err(e.into());
        }
    };

    // Ctrl-C stops new fetches; what was already scraped is still written
    let on_interrupt = crawler.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with the articles scraped so far");
            on_interrupt.cancel();
        }
    });

    let articles = crawler
        .scrape_category(
            category_url,
            config.crawler.max_pages,
            config.crawler.max_articles as usize,
        )
        .await;
    let report = crawler.report();
    let status = if crawler.is_cancelled() {
        RunStatus::Interrupted
    } else {
        RunStatus::Completed
    };

    let json = JsonOutput::new(&config.output.json_path);
    let mut handlers: Vec<&dyn OutputHandler> = vec![&json];
    if let Some(archive) = &archive {
        handlers.push(archive);
    }

    if let Err(e) = write_all(&handlers, &articles, status) {
        if let Some(archive) = &archive {
            archive.finalize(RunStatus::Failed)?;
        }
        return Err(e).context("Failed to write articles");
    }

    print_run_report(&report, articles.len());
    println!(
        "\nScraped {} articles. Saved to {}",
        articles.len(),
        config.output.json_path
    );

    Ok(())
}
