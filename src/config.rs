use crate::engine::classifier::EventVocabulary;
use crate::engine::ranker::ErrorPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub vocabulary: EventVocabulary,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedProvider {
    File,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_provider")]
    pub provider: FeedProvider,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_ms: u64,
}

fn default_provider() -> FeedProvider { FeedProvider::File }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_timeout() -> u64 { 10_000 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            data_dir: default_data_dir(),
            base_url: None,
            request_timeout_ms: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HarvestConfig {
    #[serde(default = "default_first_season")]
    pub first_season: u16,
    #[serde(default = "default_last_season")]
    pub last_season: u16,
    #[serde(default = "default_first_week")]
    pub first_week: u8,
    #[serde(default = "default_last_week")]
    pub last_week: u8,
    #[serde(default = "default_punt_marker")]
    pub punt_marker: String,
}

fn default_first_season() -> u16 { 2009 }
fn default_last_season() -> u16 { 2018 }
fn default_first_week() -> u8 { 1 }
fn default_last_week() -> u8 { 17 }
fn default_punt_marker() -> String { "punts".to_string() }

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            first_season: default_first_season(),
            last_season: default_last_season(),
            first_week: default_first_week(),
            last_week: default_last_week(),
            punt_marker: default_punt_marker(),
        }
    }
}

impl HarvestConfig {
    pub fn seasons(&self) -> RangeInclusive<u16> {
        self.first_season..=self.last_season
    }

    pub fn weeks(&self) -> RangeInclusive<u8> {
        self.first_week..=self.last_week
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize { 25 }

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            parallel: false,
            top: default_top(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Log to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_filter() -> String { "surrender_index=info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter(), file: None }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.harvest.first_season > self.harvest.last_season {
            anyhow::bail!(
                "harvest.first_season {} is after last_season {}",
                self.harvest.first_season,
                self.harvest.last_season
            );
        }
        if self.harvest.first_week == 0 || self.harvest.first_week > self.harvest.last_week {
            anyhow::bail!(
                "harvest weeks must satisfy 1 <= first_week <= last_week (got {}..={})",
                self.harvest.first_week,
                self.harvest.last_week
            );
        }
        if self.harvest.punt_marker.is_empty() {
            anyhow::bail!("harvest.punt_marker cannot be empty");
        }
        if self.feed.provider == FeedProvider::Http && self.feed.base_url.is_none() {
            anyhow::bail!("feed.base_url is required when feed.provider = \"http\"");
        }
        Ok(())
    }
}
