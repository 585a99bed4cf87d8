// Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLC bar. `time` is a UNIX timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// high ≥ max(open, close) and low ≤ min(open, close)
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Skip,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
            TradeAction::Skip => "skip",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,   // Profit when price rises
    Short,  // Profit when price falls
}

impl Direction {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => f.write_str("long"),
            Direction::Short => f.write_str("short"),
        }
    }
}

/// Which boundary the price touched first after entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskOutcome {
    Tp,
    Stop,
    None,
}

impl fmt::Display for RiskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskOutcome::Tp => f.write_str("tp"),
            RiskOutcome::Stop => f.write_str("stop"),
            RiskOutcome::None => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternLabel {
    BullFlag,
    BearFlag,
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    AscendingTriangle,
    SymmetricalTriangle,
    NoPattern,
}

impl PatternLabel {
    pub const ALL: [PatternLabel; 8] = [
        PatternLabel::BullFlag,
        PatternLabel::BearFlag,
        PatternLabel::DoubleTop,
        PatternLabel::DoubleBottom,
        PatternLabel::HeadAndShoulders,
        PatternLabel::AscendingTriangle,
        PatternLabel::SymmetricalTriangle,
        PatternLabel::NoPattern,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternLabel::BullFlag => "Bull Flag",
            PatternLabel::BearFlag => "Bear Flag",
            PatternLabel::DoubleTop => "Double Top",
            PatternLabel::DoubleBottom => "Double Bottom",
            PatternLabel::HeadAndShoulders => "Head & Shoulders",
            PatternLabel::AscendingTriangle => "Ascending Triangle",
            PatternLabel::SymmetricalTriangle => "Symmetrical Triangle",
            PatternLabel::NoPattern => "No Pattern",
        }
    }

    /// Case-insensitive lookup by display name ("double top", "Head & Shoulders")
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.name().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nominal candle interval shown to the user. Does not change generation density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [
        Timeframe::OneMinute,
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Generation constants
pub const CANDLE_SPACING_SECS: i64 = 60;
pub const BASE_PRICE: f64 = 100.0;
pub const BASE_PRICE_SPREAD: f64 = 10.0;
