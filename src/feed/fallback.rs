// Static payload shown when the chart server is unavailable

use super::{ChartPayload, FeedCandle, TimeframeChart};

const HALF_HOUR: i64 = 1_800;
const HOUR: i64 = 3_600;
const HALF_DAY: i64 = 43_200;

const OHLC: [(f64, f64, f64, f64); 3] = [
    (100.0, 102.0, 99.0, 101.0),
    (101.0, 103.0, 100.0, 102.0),
    (102.0, 104.0, 101.0, 103.0),
];
const VWAP: [f64; 3] = [100.5, 101.2, 102.1];
const EMA9: [f64; 3] = [100.3, 101.0, 101.8];
const DAILY_SR_LEVELS: [f64; 2] = [99.0, 104.0];

/// Three candles per timeframe ending at `now` (unix seconds)
pub fn fallback_payload(now: i64) -> ChartPayload {
    ChartPayload {
        one_minute: three_candles(now, HALF_HOUR, Vec::new()),
        one_hour: three_candles(now, HOUR, Vec::new()),
        one_day: three_candles(now, HALF_DAY, DAILY_SR_LEVELS.to_vec()),
    }
}

fn three_candles(now: i64, spacing: i64, sr_levels: Vec<f64>) -> TimeframeChart {
    let candles = OHLC
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| FeedCandle {
            time: now - spacing * (2 - i as i64),
            open,
            high,
            low,
            close,
            volume: None,
            vwap: Some(VWAP[i]),
            ema9: Some(EMA9[i]),
        })
        .collect();

    TimeframeChart { candles, sr_levels }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let payload = fallback_payload(100_000);

        assert_eq!(payload.one_minute.candles.iter().map(|c| c.time).collect::<Vec<_>>(),
                   vec![96_400, 98_200, 100_000]);
        assert_eq!(payload.one_hour.candles[0].time, 92_800);
        assert_eq!(payload.one_day.candles[0].time, 13_600);
        assert_eq!(payload.one_day.sr_levels, vec![99.0, 104.0]);
        assert!(payload.one_hour.sr_levels.is_empty());
        assert_eq!(payload.one_minute.vwap(), vec![100.5, 101.2, 102.1]);
        assert_eq!(payload.one_day.ema9(), vec![100.3, 101.0, 101.8]);
        assert_eq!(payload.one_day.last_close(), Some(103.0));
    }
}
