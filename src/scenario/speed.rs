// Speed Mode scenarios: read the short-term trend and buy, sell or skip

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::core::types::{Candle, TradeAction};
use super::walk::WalkProfile;

pub const SPEED_CANDLES: usize = 20;
pub const TREND_WINDOW: usize = 4;      // Last N candles compared close-to-close
pub const TREND_THRESHOLD: f64 = 1.0;   // Close delta needed to call a trend

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedScenario {
    pub candles: Vec<Candle>,
    pub answer: TradeAction,
    pub pattern: String,
}

impl SpeedScenario {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, start_price: f64, start_time: i64) -> Self {
        let candles = WalkProfile::random_walk(1.0, 1.0).walk(rng, start_price, start_time, SPEED_CANDLES);
        let answer = classify_trend(&candles);

        Self {
            candles,
            answer,
            pattern: trend_label(answer).to_string(),
        }
    }

    /// Close delta across the trend window
    pub fn trend_delta(&self) -> f64 {
        window_delta(&self.candles)
    }
}

fn window_delta(candles: &[Candle]) -> f64 {
    if candles.len() < TREND_WINDOW {
        return 0.0;
    }
    let window = &candles[candles.len() - TREND_WINDOW..];
    window[TREND_WINDOW - 1].close - window[0].close
}

/// buy above +1, sell below -1, otherwise skip
pub fn classify_trend(candles: &[Candle]) -> TradeAction {
    let delta = window_delta(candles);
    if delta > TREND_THRESHOLD {
        TradeAction::Buy
    } else if delta < -TREND_THRESHOLD {
        TradeAction::Sell
    } else {
        TradeAction::Skip
    }
}

pub fn trend_label(answer: TradeAction) -> &'static str {
    match answer {
        TradeAction::Buy => "trend up",
        TradeAction::Sell => "trend down",
        TradeAction::Skip => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles_with_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time: i as i64 * 60,
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
            })
            .collect()
    }

    #[test]
    fn test_classify_uses_last_four_closes() {
        // Earlier candles must not matter
        let up = candles_with_closes(&[50.0, 100.0, 100.2, 100.9, 101.5]);
        assert_eq!(classify_trend(&up), TradeAction::Buy);

        let down = candles_with_closes(&[150.0, 100.0, 99.5, 99.2, 98.7]);
        assert_eq!(classify_trend(&down), TradeAction::Sell);

        let flat = candles_with_closes(&[100.0, 100.0, 100.5, 100.8, 101.0]);
        assert_eq!(classify_trend(&flat), TradeAction::Skip);
    }

    #[test]
    fn test_threshold_is_strict() {
        let exactly_one = candles_with_closes(&[100.0, 100.25, 100.5, 101.0]);
        assert_eq!(classify_trend(&exactly_one), TradeAction::Skip);
    }

    #[test]
    fn test_too_few_candles_is_skip() {
        assert_eq!(classify_trend(&candles_with_closes(&[100.0, 110.0])), TradeAction::Skip);
    }
}
