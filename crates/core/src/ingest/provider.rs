use crate::config::Settings;
use crate::domain::stock::StockRecord;
use crate::ingest::types::LoadError;
use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Fetches and parses the whole feed. Called once per session.
    async fn fetch_records(&self) -> Result<Vec<StockRecord>, LoadError>;
}

/// GET against the feed URL. One attempt; no retries.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    http: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build feed http client")?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpFeed {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_records(&self) -> Result<Vec<StockRecord>, LoadError> {
        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice::<Vec<StockRecord>>(&bytes)?)
    }
}

/// The feed as a file on disk.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl FeedSource for FileFeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_records(&self) -> Result<Vec<StockRecord>, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice::<Vec<StockRecord>>(&bytes)?)
    }
}

/// Where the feed lives: `http(s)://` locations are fetched, anything else is a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Url(String),
    File(PathBuf),
}

impl FeedLocation {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            FeedLocation::Url(s.to_string())
        } else {
            FeedLocation::File(PathBuf::from(s))
        }
    }

    pub fn into_source(self, settings: &Settings) -> anyhow::Result<Box<dyn FeedSource>> {
        let source: Box<dyn FeedSource> = match self {
            FeedLocation::Url(url) => Box::new(HttpFeed::new(url, settings.feed_timeout())?),
            FeedLocation::File(path) => Box::new(FileFeed::new(path)),
        };
        Ok(source)
    }
}
