//! Desktop chart feed
//!
//! Multi-timeframe candles for one symbol from the chart data server, with a
//! per-symbol TTL cache and a static fallback payload when the server cannot
//! be reached.

pub mod cache;
pub mod client;
pub mod fallback;

use serde::{Deserialize, Serialize};

pub use cache::ChartCache;
pub use client::{ChartFeed, FeedLoad, FeedSource};
pub use fallback::fallback_payload;

pub const KNOWN_SYMBOLS: [&str; 8] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA", "META", "NFLX"];

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            FeedError::Http(status.as_u16())
        } else if err.is_decode() {
            FeedError::Parse(err.to_string())
        } else {
            FeedError::Network(err.to_string())
        }
    }
}

/// One candle as served by the chart server; indicators are optional per candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ema9: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeframeChart {
    #[serde(default)]
    pub candles: Vec<FeedCandle>,
    #[serde(default)]
    pub sr_levels: Vec<f64>,
}

impl TimeframeChart {
    pub fn vwap(&self) -> Vec<f64> {
        self.candles.iter().filter_map(|c| c.vwap).collect()
    }

    pub fn ema9(&self) -> Vec<f64> {
        self.candles.iter().filter_map(|c| c.ema9).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }
}

/// Response body of `GET /chart_data/{symbol}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "1min", default)]
    pub one_minute: TimeframeChart,
    #[serde(rename = "1hour", default)]
    pub one_hour: TimeframeChart,
    #[serde(rename = "1day", default)]
    pub one_day: TimeframeChart,
}

impl ChartPayload {
    /// Timeframes in display order with their wire names
    pub fn timeframes(&self) -> [(&'static str, &TimeframeChart); 3] {
        [
            ("1min", &self.one_minute),
            ("1hour", &self.one_hour),
            ("1day", &self.one_day),
        ]
    }
}
