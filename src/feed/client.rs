// Chart data server client

use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use super::cache::ChartCache;
use super::fallback::fallback_payload;
use super::{ChartPayload, FeedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Live,
    Cached,
    Fallback,
}

/// Result of [`ChartFeed::load`]: always a payload, plus the error text to
/// show as a banner when it is the fallback
#[derive(Debug, Clone)]
pub struct FeedLoad {
    pub symbol: String,
    pub payload: ChartPayload,
    pub source: FeedSource,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ChartFeed {
    client: reqwest::Client,
    base_url: String,
    cache: ChartCache,
}

impl ChartFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ChartCache::new(Duration::from_secs(config.cache_ttl_secs)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the multi-timeframe payload for `symbol`, serving from cache while fresh
    pub async fn fetch(&mut self, symbol: &str) -> Result<ChartPayload, FeedError> {
        let symbol = symbol.trim().to_uppercase();
        if let Some(cached) = self.cache.get(&symbol) {
            debug!("📦 Chart cache hit for {}", symbol);
            return Ok(cached.clone());
        }

        let payload = self.request(&symbol).await?;
        self.cache.insert(&symbol, payload.clone());
        Ok(payload)
    }

    /// Like [`fetch`](Self::fetch) but never fails: errors swap in the fallback payload
    pub async fn load(&mut self, symbol: &str) -> FeedLoad {
        let symbol = symbol.trim().to_uppercase();
        let was_cached = self.cache.get(&symbol).is_some();

        match self.fetch(&symbol).await {
            Ok(payload) => FeedLoad {
                symbol,
                payload,
                source: if was_cached { FeedSource::Cached } else { FeedSource::Live },
                error: None,
            },
            Err(err) => {
                warn!("⚠️  Chart data for {} unavailable ({}), using fallback data", symbol, err);
                FeedLoad {
                    symbol,
                    payload: fallback_payload(Utc::now().timestamp()),
                    source: FeedSource::Fallback,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn request(&self, symbol: &str) -> Result<ChartPayload, FeedError> {
        let url = format!("{}/chart_data/{}", self.base_url, symbol);
        debug!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Http(response.status().as_u16()));
        }

        let body = response.text().await?;
        let payload: ChartPayload =
            serde_json::from_str(&body).map_err(|e| FeedError::Parse(e.to_string()))?;

        info!("📊 Loaded {} chart: {} / {} / {} candles", symbol,
              payload.one_minute.candles.len(),
              payload.one_hour.candles.len(),
              payload.one_day.candles.len());
        Ok(payload)
    }
}
