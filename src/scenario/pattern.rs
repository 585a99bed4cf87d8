// Pattern Snap scenarios: name the chart pattern from four choices

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::core::types::{Candle, PatternLabel, Timeframe};
use super::walk::{Step, WalkProfile};

pub const PATTERN_CANDLES: usize = 25;
pub const CHOICE_COUNT: usize = 4;
const PATTERN_WICK: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternScenario {
    pub candles: Vec<Candle>,
    pub pattern: PatternLabel,
    pub timeframe: Timeframe,
    /// True label plus three distinct decoys, shuffled
    pub choices: [PatternLabel; CHOICE_COUNT],
}

impl PatternScenario {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, start_price: f64, start_time: i64) -> Self {
        let pattern = *PatternLabel::ALL
            .choose(rng)
            .unwrap_or(&PatternLabel::NoPattern);
        Self::generate_labeled(rng, pattern, start_price, start_time)
    }

    /// Generate a scenario for a fixed label
    pub fn generate_labeled<R: Rng + ?Sized>(
        rng: &mut R,
        pattern: PatternLabel,
        start_price: f64,
        start_time: i64,
    ) -> Self {
        let candles = profile_for(pattern).walk(rng, start_price, start_time, PATTERN_CANDLES);
        let timeframe = *Timeframe::ALL.choose(rng).unwrap_or(&Timeframe::OneMinute);
        let choices = build_choices(rng, pattern);

        Self {
            candles,
            pattern,
            timeframe,
            choices,
        }
    }

    /// Choice by 1-based position, as numbered for the player
    pub fn choice(&self, number: usize) -> Option<PatternLabel> {
        number
            .checked_sub(1)
            .and_then(|i| self.choices.get(i))
            .copied()
    }
}

fn build_choices<R: Rng + ?Sized>(rng: &mut R, answer: PatternLabel) -> [PatternLabel; CHOICE_COUNT] {
    let decoys: Vec<PatternLabel> = PatternLabel::ALL
        .iter()
        .copied()
        .filter(|label| *label != answer)
        .collect();

    let mut choices = [answer; CHOICE_COUNT];
    for (slot, decoy) in choices[1..]
        .iter_mut()
        .zip(decoys.choose_multiple(rng, CHOICE_COUNT - 1))
    {
        *slot = *decoy;
    }
    choices.shuffle(rng);
    choices
}

fn drift(min: f64, max: f64) -> Step {
    Step::Drift { min, max }
}

/// Walk shape for each label
pub fn profile_for(label: PatternLabel) -> WalkProfile {
    match label {
        // Strong pole, then a tight flag
        PatternLabel::BullFlag => WalkProfile::new(drift(-0.25, 0.25), PATTERN_WICK)
            .leg(15, drift(0.5, 2.0)),
        PatternLabel::BearFlag => WalkProfile::new(drift(-0.25, 0.25), PATTERN_WICK)
            .leg(15, drift(-2.0, -0.5)),

        // Two peaks of similar height, then a breakdown
        PatternLabel::DoubleTop => WalkProfile::new(drift(-1.0, -0.3), PATTERN_WICK)
            .leg(6, drift(0.6, 1.4))
            .leg(11, drift(-1.4, -0.6))
            .leg(16, drift(0.6, 1.4)),
        PatternLabel::DoubleBottom => WalkProfile::new(drift(0.3, 1.0), PATTERN_WICK)
            .leg(6, drift(-1.4, -0.6))
            .leg(11, drift(0.6, 1.4))
            .leg(16, drift(-1.4, -0.6)),

        // Left shoulder, higher head, lower right shoulder, neckline break
        PatternLabel::HeadAndShoulders => WalkProfile::new(drift(-1.0, -0.4), PATTERN_WICK)
            .leg(5, drift(0.4, 1.0))
            .leg(8, drift(-1.0, -0.4))
            .leg(13, drift(0.6, 1.4))
            .leg(17, drift(-1.4, -0.6))
            .leg(20, drift(0.4, 1.0)),

        PatternLabel::AscendingTriangle => WalkProfile::new(
            Step::Ceiling {
                height: 3.0,
                rally_every: 3,
                rally: (0.5, 1.5),
                pullback: (-1.0, 0.3),
            },
            PATTERN_WICK,
        ),
        PatternLabel::SymmetricalTriangle => WalkProfile::new(
            Step::Converging {
                amplitude: 1.0,
                shrink: 0.5,
            },
            PATTERN_WICK,
        ),

        PatternLabel::NoPattern => WalkProfile::random_walk(1.0, PATTERN_WICK),
    }
}
