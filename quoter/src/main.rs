//! RateQuote Quoter Binary
//!
//! Quotes tiered currency conversions from a rate feed, or keeps the feed
//! refreshed until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratequote_common::CurrencyPair;
use ratequote_feed::{spawn_refresher, FileRateSource, PairFilter, RateBook};
use ratequote_quoter::render::render_quotes;
use ratequote_quoter::QuoterConfig;

/// RateQuote CLI
#[derive(Parser, Debug)]
#[command(name = "quoter")]
#[command(about = "Tiered currency conversion quotes")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rate feed file, overrides the configuration
    #[arg(short, long)]
    feed: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote an amount in both directions for every configured group
    Quote {
        /// Amount in source currency units
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Only show this pair (and its reverse), e.g. USD/RUB
        #[arg(short, long)]
        pair: Option<CurrencyPair>,
    },

    /// Keep the rate book refreshed until Ctrl+C
    Watch,
}

fn load_config(cli: &Cli) -> anyhow::Result<QuoterConfig> {
    let mut config = match &cli.config {
        Some(path) => QuoterConfig::from_file(path)?,
        None => QuoterConfig::default(),
    }
    .with_env();

    if let Some(feed) = &cli.feed {
        config.feed_path = feed.clone();
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &QuoterConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
    );
    let json = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let plain = (!config.json_logs)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

async fn run_quote(
    config: &QuoterConfig,
    amount: f64,
    pair: Option<CurrencyPair>,
) -> anyhow::Result<()> {
    let book = RateBook::new();
    let source = FileRateSource::new(&config.feed_path);
    let snapshot = book
        .refresh(&source)
        .await
        .with_context(|| format!("loading rates from {}", config.feed_path))?;

    let mut filters = vec![PairFilter::Groups(config.groups.clone())];
    if let Some(pair) = pair {
        filters.push(PairFilter::Pairs(vec![pair.inverse(), pair]));
    }
    let entries = snapshot.filter(&filters);

    let text = render_quotes(amount, &entries, &config.groups);
    if text.is_empty() {
        println!("No rates apply to {}", amount);
    } else {
        print!("{}", text);
    }
    Ok(())
}

async fn run_watch(config: &QuoterConfig) -> anyhow::Result<()> {
    let book = Arc::new(RateBook::new());
    let source = Arc::new(FileRateSource::new(&config.feed_path));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let refresher = spawn_refresher(
        book.clone(),
        source,
        config.refresh_interval(),
        shutdown_rx,
    );

    info!(
        feed = %config.feed_path,
        interval_secs = config.refresh_interval_secs,
        "Quoter watching rate feed"
    );

    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl+C")?;
    info!("Shutdown signal received");

    if shutdown_tx.send(true).is_err() {
        error!("Refresher already stopped");
    }
    refresher.await.context("joining refresher")?;

    let stats = book.stats();
    info!(
        pairs = stats.pairs,
        refreshes = stats.refreshes,
        failures = stats.failures,
        "Quoter shutdown complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config);

    match cli.command {
        Command::Quote { amount, pair } => run_quote(&config, amount, pair).await,
        Command::Watch => run_watch(&config).await,
    }
}
