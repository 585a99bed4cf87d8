// Risk Manager scenarios: place a stop and a target around a fixed entry

use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::core::types::{Candle, Direction, RiskOutcome};
use super::walk::{uniform, WalkProfile};

pub const RISK_CANDLES: usize = 20;
pub const ENTRY_INDEX: usize = 18;

// Generated stop/target distances from entry
const STOP_DISTANCE: (f64, f64) = (0.5, 2.0);
const TARGET_DISTANCE: (f64, f64) = (1.0, 3.0);

// Slider bounds offered to the player, as fractions of entry
const NEAR_PCT: f64 = 0.005;
const FAR_PCT: f64 = 0.05;

pub const MIN_POSITION_SIZE: u8 = 1;
pub const MAX_POSITION_SIZE: u8 = 10;

// Levels substituted when the countdown expires
const TIMEOUT_STOP_DISTANCE: f64 = 1.0;
const TIMEOUT_TARGET_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScenario {
    pub candles: Vec<Candle>,
    pub entry: f64,
    pub direction: Direction,
    pub stop: f64,
    pub tp: f64,
    pub outcome: RiskOutcome,
    pub rr: f64,
}

/// Stop, target and size chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub size: u8,
    pub stop: f64,
    pub tp: f64,
}

impl RiskLevels {
    pub fn new(stop: f64, tp: f64, size: u8) -> Self {
        Self {
            size: size.clamp(MIN_POSITION_SIZE, MAX_POSITION_SIZE),
            stop,
            tp,
        }
    }
}

impl RiskScenario {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, start_price: f64, start_time: i64) -> Self {
        let candles = WalkProfile::random_walk(1.0, 1.0).walk(rng, start_price, start_time, RISK_CANDLES);
        let entry = candles[ENTRY_INDEX].close;
        let direction = if rng.gen_bool(0.5) { Direction::Long } else { Direction::Short };

        let stop_distance = uniform(rng, STOP_DISTANCE.0, STOP_DISTANCE.1);
        let target_distance = uniform(rng, TARGET_DISTANCE.0, TARGET_DISTANCE.1);
        let stop = entry - direction.sign() * stop_distance;
        let tp = entry + direction.sign() * target_distance;

        let outcome = scan_outcome(&candles[ENTRY_INDEX + 1..], direction, stop, tp);

        Self {
            candles,
            entry,
            direction,
            stop,
            tp,
            outcome,
            rr: reward_risk(entry, stop, tp),
        }
    }

    /// Candles after the entry bar
    pub fn follow_through(&self) -> &[Candle] {
        &self.candles[(ENTRY_INDEX + 1).min(self.candles.len())..]
    }

    /// (min, max) stop a front end should offer
    pub fn stop_bounds(&self) -> (f64, f64) {
        match self.direction {
            Direction::Long => (self.entry * (1.0 - FAR_PCT), self.entry * (1.0 - NEAR_PCT)),
            Direction::Short => (self.entry * (1.0 + NEAR_PCT), self.entry * (1.0 + FAR_PCT)),
        }
    }

    /// (min, max) target a front end should offer
    pub fn target_bounds(&self) -> (f64, f64) {
        match self.direction {
            Direction::Long => (self.entry * (1.0 + NEAR_PCT), self.entry * (1.0 + FAR_PCT)),
            Direction::Short => (self.entry * (1.0 - FAR_PCT), self.entry * (1.0 - NEAR_PCT)),
        }
    }

    /// One unit of adverse stop, two units of favourable target, size 1
    pub fn timeout_levels(&self) -> RiskLevels {
        let sign = self.direction.sign();
        RiskLevels::new(
            self.entry - sign * TIMEOUT_STOP_DISTANCE,
            self.entry + sign * TIMEOUT_TARGET_DISTANCE,
            MIN_POSITION_SIZE,
        )
    }
}

/// |tp - entry| / |entry - stop|
pub fn reward_risk(entry: f64, stop: f64, tp: f64) -> f64 {
    ((tp - entry) / (entry - stop)).abs()
}

/// First boundary touched by `candles`; the stop is checked before the target on each bar
pub fn scan_outcome(candles: &[Candle], direction: Direction, stop: f64, tp: f64) -> RiskOutcome {
    for candle in candles {
        match direction {
            Direction::Long => {
                if candle.low <= stop {
                    return RiskOutcome::Stop;
                }
                if candle.high >= tp {
                    return RiskOutcome::Tp;
                }
            }
            Direction::Short => {
                if candle.high >= stop {
                    return RiskOutcome::Stop;
                }
                if candle.low <= tp {
                    return RiskOutcome::Tp;
                }
            }
        }
    }
    RiskOutcome::None
}
