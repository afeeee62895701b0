//! Feed sources and the parse-and-validate pass over a feed document.

use crate::{
    constants::{DEFAULT_FEED_TIMEOUT_SECS, USER_AGENT, USGS_FEED_BASE},
    data::{
        feature::{EarthquakeFeature, FeatureError},
        geojson::{raw_feature_id, FeedMetadata, GeoJsonFeatureCollection},
    },
    MapError, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

/// Anything that can produce the raw text of a GeoJSON feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve the current feed document
    async fn fetch(&self) -> Result<String>;

    /// Human readable origin, used in logs
    fn describe(&self) -> String;
}

/// Fetches a feed over HTTP(S)
pub struct HttpFeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// Source with the default user agent and timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(url, client))
    }

    /// Source sharing an existing client and its connection pool
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<String> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Feed(format!("{} returned HTTP {}", self.url, status)));
        }

        let body = response.text().await?;
        log::info!("fetched {} ({} bytes)", self.url, body.len());
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a feed previously saved to disk
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn fetch(&self) -> Result<String> {
        #[cfg(feature = "tokio-runtime")]
        let body = tokio::fs::read_to_string(&self.path).await?;
        // Without tokio the read blocks the calling task
        #[cfg(not(feature = "tokio-runtime"))]
        let body = std::fs::read_to_string(&self.path)?;
        log::info!("read {} ({} bytes)", self.path.display(), body.len());
        Ok(body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed document, for embedding callers and tests
pub struct StaticFeedSource {
    body: String,
}

impl StaticFeedSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "static feed".to_string()
    }
}

/// Minimum magnitude class of a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMagnitude {
    Significant,
    #[serde(rename = "4.5")]
    M4_5,
    #[serde(rename = "2.5")]
    M2_5,
    #[serde(rename = "1.0")]
    M1_0,
    #[default]
    All,
}

impl fmt::Display for FeedMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMagnitude::Significant => write!(f, "significant"),
            FeedMagnitude::M4_5 => write!(f, "4.5"),
            FeedMagnitude::M2_5 => write!(f, "2.5"),
            FeedMagnitude::M1_0 => write!(f, "1.0"),
            FeedMagnitude::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for FeedMagnitude {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "significant" => Ok(FeedMagnitude::Significant),
            "4.5" => Ok(FeedMagnitude::M4_5),
            "2.5" => Ok(FeedMagnitude::M2_5),
            "1.0" | "1" => Ok(FeedMagnitude::M1_0),
            "all" => Ok(FeedMagnitude::All),
            other => Err(MapError::Config(format!(
                "unknown feed magnitude '{}', expected significant, 4.5, 2.5, 1.0 or all",
                other
            ))),
        }
    }
}

/// Time window of a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedPeriod::Hour => write!(f, "hour"),
            FeedPeriod::Day => write!(f, "day"),
            FeedPeriod::Week => write!(f, "week"),
            FeedPeriod::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for FeedPeriod {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(FeedPeriod::Hour),
            "day" => Ok(FeedPeriod::Day),
            "week" => Ok(FeedPeriod::Week),
            "month" => Ok(FeedPeriod::Month),
            other => Err(MapError::Config(format!(
                "unknown feed period '{}', expected hour, day, week or month",
                other
            ))),
        }
    }
}

/// One of the USGS real-time summary feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsgsFeed {
    pub magnitude: FeedMagnitude,
    pub period: FeedPeriod,
}

impl UsgsFeed {
    pub fn new(magnitude: FeedMagnitude, period: FeedPeriod) -> Self {
        Self { magnitude, period }
    }

    pub fn url(&self) -> String {
        format!("{}/{}_{}.geojson", USGS_FEED_BASE, self.magnitude, self.period)
    }
}

/// A feed entry that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    /// Position in the feed's `features` array
    pub index: usize,
    pub id: Option<String>,
    pub reason: FeatureError,
}

/// Result of validating one feed document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedBatch {
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<EarthquakeFeature>,
    pub skipped: Vec<SkippedFeature>,
}

impl FeedBatch {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feed title, if the document carried one
    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }
}

/// Parses a feed document and validates every feature independently.
///
/// Only a document that is not a `FeatureCollection` is an error; bad
/// features are collected in [`FeedBatch::skipped`].
pub fn parse_feed(text: &str) -> Result<FeedBatch> {
    let collection = GeoJsonFeatureCollection::from_str(text)?;

    let mut batch = FeedBatch {
        metadata: collection.metadata,
        features: Vec::with_capacity(collection.features.len()),
        skipped: Vec::new(),
    };

    for (index, raw) in collection.features.iter().enumerate() {
        match EarthquakeFeature::from_raw(raw) {
            Ok(feature) => batch.features.push(feature),
            Err(reason) => {
                let id = raw_feature_id(raw);
                log::warn!(
                    "skipping feature #{} ({}): {}",
                    index,
                    id.as_deref().unwrap_or("no id"),
                    reason
                );
                batch.skipped.push(SkippedFeature { index, id, reason });
            }
        }
    }

    log::debug!(
        "parsed {} features, skipped {}",
        batch.features.len(),
        batch.skipped.len()
    );
    Ok(batch)
}
