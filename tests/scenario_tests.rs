// Property-style checks over many seeded scenarios

use std::collections::HashSet;

use trade_reflex::core::types::CANDLE_SPACING_SECS;
use trade_reflex::scenario::pattern::{PatternScenario, PATTERN_CANDLES};
use trade_reflex::scenario::risk::{reward_risk, scan_outcome, ENTRY_INDEX, RISK_CANDLES};
use trade_reflex::scenario::speed::{classify_trend, SPEED_CANDLES, TREND_THRESHOLD};
use trade_reflex::{
    Candle, Direction, PatternLabel, RiskOutcome, Scenario, ScenarioGenerator, TradeAction, TrainingMode,
};

fn assert_chart_shape(candles: &[Candle], expected_len: usize) {
    assert_eq!(candles.len(), expected_len);
    for pair in candles.windows(2) {
        assert_eq!(pair[1].time - pair[0].time, CANDLE_SPACING_SECS);
    }
    for candle in candles {
        assert!(candle.is_well_formed(), "malformed candle {:?}", candle);
    }
}

#[test]
fn test_speed_answer_follows_last_four_closes() {
    let mut generator = ScenarioGenerator::seeded(11);
    for _ in 0..200 {
        let scenario = generator.speed();
        assert_chart_shape(&scenario.candles, SPEED_CANDLES);

        let n = scenario.candles.len();
        let delta = scenario.candles[n - 1].close - scenario.candles[n - 4].close;
        let expected = if delta > TREND_THRESHOLD {
            TradeAction::Buy
        } else if delta < -TREND_THRESHOLD {
            TradeAction::Sell
        } else {
            TradeAction::Skip
        };

        assert_eq!(scenario.answer, expected);
        assert_eq!(classify_trend(&scenario.candles), expected);
        assert!((scenario.trend_delta() - delta).abs() < 1e-9);
    }
}

#[test]
fn test_risk_outcome_and_rr() {
    let mut generator = ScenarioGenerator::seeded(22);
    for _ in 0..200 {
        let scenario = generator.risk();
        assert_chart_shape(&scenario.candles, RISK_CANDLES);
        assert_eq!(scenario.entry, scenario.candles[ENTRY_INDEX].close);

        match scenario.direction {
            Direction::Long => assert!(scenario.stop < scenario.entry && scenario.entry < scenario.tp),
            Direction::Short => assert!(scenario.tp < scenario.entry && scenario.entry < scenario.stop),
        }

        let expected_rr = (scenario.tp - scenario.entry).abs() / (scenario.entry - scenario.stop).abs();
        assert!((scenario.rr - expected_rr).abs() < 1e-9);

        let after = scenario.follow_through();
        assert_eq!(after.len(), RISK_CANDLES - ENTRY_INDEX - 1);
        assert_eq!(
            scenario.outcome,
            scan_outcome(after, scenario.direction, scenario.stop, scenario.tp)
        );
        if scenario.outcome == RiskOutcome::None {
            for candle in after {
                assert!(candle.low > scenario.stop.min(scenario.tp));
                assert!(candle.high < scenario.stop.max(scenario.tp));
            }
        }
    }
}

#[test]
fn test_scan_outcome_first_breach_wins() {
    let bar = |low: f64, high: f64| Candle { time: 0, open: low, high, low, close: high };

    let candles = [bar(99.5, 100.5), bar(99.0, 103.5), bar(96.0, 100.0)];
    assert_eq!(scan_outcome(&candles, Direction::Long, 97.0, 103.0), RiskOutcome::Tp);
    assert_eq!(scan_outcome(&candles, Direction::Short, 103.0, 97.0), RiskOutcome::Stop);
    assert_eq!(scan_outcome(&candles[..1], Direction::Long, 97.0, 103.0), RiskOutcome::None);
}

#[test]
fn test_rr_example() {
    assert!((reward_risk(100.0, 97.0, 106.0) - 2.0).abs() < 1e-9);
}

#[test]
fn test_pattern_choices_contain_answer() {
    let mut generator = ScenarioGenerator::seeded(33);
    let mut seen = HashSet::new();

    for _ in 0..300 {
        let scenario = generator.pattern();
        assert_chart_shape(&scenario.candles, PATTERN_CANDLES);
        assert!(scenario.choices.contains(&scenario.pattern));

        let distinct: HashSet<_> = scenario.choices.iter().collect();
        assert_eq!(distinct.len(), 4);
        seen.insert(scenario.pattern);
    }

    assert_eq!(seen.len(), PatternLabel::ALL.len());
}

#[test]
fn test_every_label_generates_valid_chart() {
    let mut generator = ScenarioGenerator::seeded(44);
    for label in PatternLabel::ALL {
        let scenario = PatternScenario::generate_labeled(generator.rng(), label, 100.0, 0);
        assert_eq!(scenario.pattern, label);
        assert_chart_shape(&scenario.candles, PATTERN_CANDLES);
        assert_eq!(scenario.candles[0].open, 100.0);
    }
}

#[test]
fn test_seeded_batches_reproduce() {
    let first = ScenarioGenerator::seeded(7).with_start_time(1_700_000_000).batch(TrainingMode::Risk, 5);
    let second = ScenarioGenerator::seeded(7).with_start_time(1_700_000_000).batch(TrainingMode::Risk, 5);
    assert_eq!(first, second);

    let other = ScenarioGenerator::seeded(8).with_start_time(1_700_000_000).batch(TrainingMode::Risk, 5);
    assert_ne!(first, other);
}

#[test]
fn test_batch_matches_mode() {
    let mut generator = ScenarioGenerator::seeded(5);
    for mode in TrainingMode::ALL {
        let batch = generator.batch(mode, 4);
        assert_eq!(batch.len(), 4);
        assert!(batch.iter().all(|s| s.mode() == mode));
    }
    assert!(matches!(generator.generate(TrainingMode::Speed), Scenario::Speed(_)));
}
