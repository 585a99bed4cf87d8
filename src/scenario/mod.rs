//! Synthetic chart scenario generation
//!
//! Every training mode draws its scenarios from a [`ScenarioGenerator`]. The
//! random source is injected so sessions can be replayed from a seed.

pub mod walk;
pub mod speed;
pub mod risk;
pub mod pattern;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Candle, BASE_PRICE, BASE_PRICE_SPREAD};
use crate::session::mode::TrainingMode;
use walk::uniform;

pub use pattern::PatternScenario;
pub use risk::{RiskLevels, RiskScenario};
pub use speed::SpeedScenario;
pub use walk::{Step, WalkProfile};

/// A scenario of any training mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Scenario {
    Speed(SpeedScenario),
    Risk(RiskScenario),
    Pattern(PatternScenario),
}

impl Scenario {
    pub fn mode(&self) -> TrainingMode {
        match self {
            Scenario::Speed(_) => TrainingMode::Speed,
            Scenario::Risk(_) => TrainingMode::Risk,
            Scenario::Pattern(_) => TrainingMode::Pattern,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        match self {
            Scenario::Speed(s) => &s.candles,
            Scenario::Risk(s) => &s.candles,
            Scenario::Pattern(s) => &s.candles,
        }
    }
}

pub struct ScenarioGenerator<R: Rng = StdRng> {
    rng: R,
    start_time: Option<i64>, // None: stamp candles from the wall clock
}

impl ScenarioGenerator<StdRng> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> ScenarioGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            start_time: None,
        }
    }

    /// Pin the first candle's timestamp
    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    fn next_start(&mut self) -> (f64, i64) {
        let price = BASE_PRICE + uniform(&mut self.rng, 0.0, BASE_PRICE_SPREAD);
        let time = self.start_time.unwrap_or_else(|| Utc::now().timestamp());
        (price, time)
    }

    pub fn speed(&mut self) -> SpeedScenario {
        let (price, time) = self.next_start();
        SpeedScenario::generate(&mut self.rng, price, time)
    }

    pub fn risk(&mut self) -> RiskScenario {
        let (price, time) = self.next_start();
        RiskScenario::generate(&mut self.rng, price, time)
    }

    pub fn pattern(&mut self) -> PatternScenario {
        let (price, time) = self.next_start();
        PatternScenario::generate(&mut self.rng, price, time)
    }

    pub fn generate(&mut self, mode: TrainingMode) -> Scenario {
        match mode {
            TrainingMode::Speed => Scenario::Speed(self.speed()),
            TrainingMode::Risk => Scenario::Risk(self.risk()),
            TrainingMode::Pattern => Scenario::Pattern(self.pattern()),
        }
    }

    pub fn batch(&mut self, mode: TrainingMode, count: usize) -> Vec<Scenario> {
        debug!("🎲 Generating {} {} scenarios", count, mode.label());
        (0..count).map(|_| self.generate(mode)).collect()
    }

    /// Shared random source, for per-session draws outside scenario generation
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }
}
