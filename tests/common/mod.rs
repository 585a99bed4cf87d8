// Common test utilities and helpers
#![allow(dead_code)]

use trade_reflex::{
    Config, ModeSettings, PatternLabel, ScenarioGenerator, SessionController, TrainingMode,
};

/// Short sessions, quick feedback and no tick logging
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.modes.speed = ModeSettings { time_limit_secs: 5, scenarios: 3 };
    config.modes.risk = ModeSettings { time_limit_secs: 10, scenarios: 3 };
    config.modes.pattern = ModeSettings { time_limit_secs: 7, scenarios: 3 };
    config.session.feedback_delay_ms = 100;
    config.logging.enable_tick_logging = false;
    config
}

pub fn seeded_config(seed: u64) -> Config {
    let mut config = create_test_config();
    config.session.seed = Some(seed);
    config
}

pub fn seeded_controller(seed: u64) -> SessionController {
    SessionController::from_config(&seeded_config(seed))
}

/// First seed whose opening Pattern Snap scenario is `label`
pub fn seed_for_first_pattern(label: PatternLabel) -> u64 {
    (0..10_000)
        .find(|seed| ScenarioGenerator::seeded(*seed).pattern().pattern == label)
        .expect("no seed produces the requested pattern")
}

/// The batch a seeded controller will play for `mode`
pub fn expected_batch(seed: u64, mode: TrainingMode, count: usize) -> Vec<trade_reflex::Scenario> {
    ScenarioGenerator::seeded(seed).batch(mode, count)
}
