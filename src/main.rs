use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use surrender_index::config::{Config, FeedProvider, LoggingConfig};
use surrender_index::engine::{rank_parallel, rank_with_policy, ErrorPolicy, EventClassifier, VocabularyClassifier};
use surrender_index::feed::{file::FilePlayFeed, http::HttpPlayFeed, PlayFeed};
use surrender_index::harvest::{harvest, DateRange};
use surrender_index::report;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(
    name = "surrender-index",
    about = "Rank NFL punts by how much they look like giving up",
    version
)]
struct Cli {
    /// Config file (defaults are used if the default path does not exist)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read week documents from this directory
    #[arg(long, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,
    /// Fetch week documents from this HTTP endpoint
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    first_season: Option<u16>,
    #[arg(long)]
    last_season: Option<u16>,
    #[arg(long)]
    first_week: Option<u8>,
    #[arg(long)]
    last_week: Option<u8>,
    /// Only games on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Only games on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Number of punts to print (0 = all)
    #[arg(long)]
    top: Option<usize>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Stop at the first punt that cannot be scored
    #[arg(long)]
    abort_on_error: bool,
    /// Score each game on its own worker
    #[arg(long)]
    parallel: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG))?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.feed.provider = FeedProvider::File;
        config.feed.data_dir = dir.clone();
    }
    if let Some(url) = &cli.base_url {
        config.feed.provider = FeedProvider::Http;
        config.feed.base_url = Some(url.clone());
    }
    let h = &mut config.harvest;
    h.first_season = cli.first_season.unwrap_or(h.first_season);
    h.last_season = cli.last_season.unwrap_or(h.last_season);
    h.first_week = cli.first_week.unwrap_or(h.first_week);
    h.last_week = cli.last_week.unwrap_or(h.last_week);
    if let Some(top) = cli.top {
        config.ranking.top = top;
    }
    if cli.abort_on_error {
        config.ranking.error_policy = ErrorPolicy::Abort;
    }
    config.ranking.parallel |= cli.parallel;
    config.validate()?;
    Ok(config)
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("invalid log filter {:?}", config.filter))?,
    };

    match &config.file {
        Some(path) => {
            let log_file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(log_file)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn build_feed(config: &Config) -> Result<Box<dyn PlayFeed>> {
    let feed: Box<dyn PlayFeed> = match config.feed.provider {
        FeedProvider::File => Box::new(FilePlayFeed::new(&config.feed.data_dir)),
        FeedProvider::Http => {
            let base_url = config
                .feed
                .base_url
                .as_deref()
                .context("feed.base_url is required for the http provider")?;
            Box::new(HttpPlayFeed::new(base_url, config.feed.request_timeout_ms)?)
        }
    };
    Ok(feed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let feed = build_feed(&config)?;
    let harvest_cfg = &config.harvest;
    tracing::info!(
        feed = feed.name(),
        seasons = ?harvest_cfg.seasons(),
        weeks = ?harvest_cfg.weeks(),
        "starting harvest"
    );
    let harvested = harvest(
        feed.as_ref(),
        harvest_cfg.seasons(),
        harvest_cfg.weeks(),
        DateRange::new(cli.from, cli.to),
        &harvest_cfg.punt_marker,
    )
    .await;

    let classifier: Arc<dyn EventClassifier> =
        Arc::new(VocabularyClassifier::new(config.vocabulary.clone()));
    let policy = config.ranking.error_policy;
    let outcome = if config.ranking.parallel {
        rank_parallel(harvested.punts.clone(), Arc::clone(&classifier), policy).await?
    } else {
        rank_with_policy(&harvested.punts, classifier.as_ref(), policy)?
    };

    let rows = report::build_rows(&outcome.ranked, config.ranking.top);
    if cli.json {
        println!("{}", report::render_json(&rows)?);
    } else {
        print!("{}", report::render_table(&rows));
    }

    let problems = report::render_problems(&harvested.failures, &outcome);
    if !problems.is_empty() {
        eprint!("{}", problems);
    }

    tracing::info!(
        punts = harvested.punts.len(),
        ranked = outcome.ranked.len(),
        skipped = outcome.skipped.len(),
        "done"
    );
    Ok(())
}
