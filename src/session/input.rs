// Parse a line of player input into a submission for the current scenario

use thiserror::Error;

use crate::core::types::{PatternLabel, TradeAction};
use crate::scenario::risk::{RiskLevels, MIN_POSITION_SIZE};
use crate::scenario::Scenario;
use super::evaluator::Submission;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Empty input")]
    Empty,

    #[error("Unrecognized input '{0}'")]
    Unrecognized(String),

    #[error("Choice {0} is out of range (1-4)")]
    ChoiceOutOfRange(usize),

    #[error("'{0}' is not one of the choices")]
    NotAChoice(String),

    #[error("Expected '<stop> <tp> [size]', got '{0}'")]
    BadLevels(String),
}

/// Interpret `line` against the kind of answer `scenario` expects.
///
/// - Speed: `b`/`buy`, `s`/`sell`, `k`/`skip`
/// - Risk: `<stop> <tp> [size]`, size defaults to 1
/// - Pattern: a choice number 1-4 or the name of one of the choices
pub fn parse_submission(scenario: &Scenario, line: &str) -> Result<Submission, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    match scenario {
        Scenario::Speed(_) => parse_action(line).map(Submission::Action),
        Scenario::Risk(_) => parse_levels(line).map(Submission::Levels),
        Scenario::Pattern(pattern) => {
            if let Ok(number) = line.parse::<usize>() {
                return pattern
                    .choice(number)
                    .map(Submission::Pattern)
                    .ok_or(InputError::ChoiceOutOfRange(number));
            }
            let label = PatternLabel::from_name(line)
                .ok_or_else(|| InputError::Unrecognized(line.to_string()))?;
            if !pattern.choices.contains(&label) {
                return Err(InputError::NotAChoice(label.name().to_string()));
            }
            Ok(Submission::Pattern(label))
        }
    }
}

fn parse_action(line: &str) -> Result<TradeAction, InputError> {
    match line.to_ascii_lowercase().as_str() {
        "b" | "buy" => Ok(TradeAction::Buy),
        "s" | "sell" => Ok(TradeAction::Sell),
        "k" | "skip" => Ok(TradeAction::Skip),
        _ => Err(InputError::Unrecognized(line.to_string())),
    }
}

fn parse_levels(line: &str) -> Result<RiskLevels, InputError> {
    let bad = || InputError::BadLevels(line.to_string());
    let fields: Vec<&str> = line.split_whitespace().collect();

    let (stop, tp, size) = match fields.as_slice() {
        [stop, tp] => (*stop, *tp, None),
        [stop, tp, size] => (*stop, *tp, Some(*size)),
        _ => return Err(bad()),
    };

    let stop: f64 = stop.parse().map_err(|_| bad())?;
    let tp: f64 = tp.parse().map_err(|_| bad())?;
    let size = match size {
        Some(size) => size.parse::<u8>().map_err(|_| bad())?,
        None => MIN_POSITION_SIZE,
    };
    if !stop.is_finite() || !tp.is_finite() {
        return Err(bad());
    }

    Ok(RiskLevels::new(stop, tp, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioGenerator;

    #[test]
    fn test_speed_keys() {
        let scenario = Scenario::Speed(ScenarioGenerator::seeded(1).speed());
        assert_eq!(parse_submission(&scenario, "b"), Ok(Submission::Action(TradeAction::Buy)));
        assert_eq!(parse_submission(&scenario, " SELL "), Ok(Submission::Action(TradeAction::Sell)));
        assert_eq!(parse_submission(&scenario, "k"), Ok(Submission::Action(TradeAction::Skip)));
        assert_eq!(parse_submission(&scenario, ""), Err(InputError::Empty));
        assert!(matches!(parse_submission(&scenario, "hold"), Err(InputError::Unrecognized(_))));
    }

    #[test]
    fn test_risk_levels() {
        let scenario = Scenario::Risk(ScenarioGenerator::seeded(2).risk());
        assert_eq!(
            parse_submission(&scenario, "98.5 104"),
            Ok(Submission::Levels(RiskLevels::new(98.5, 104.0, 1)))
        );
        assert_eq!(
            parse_submission(&scenario, "98 104 50"),
            Ok(Submission::Levels(RiskLevels::new(98.0, 104.0, 10)))
        );
        assert!(matches!(parse_submission(&scenario, "98"), Err(InputError::BadLevels(_))));
        assert!(matches!(parse_submission(&scenario, "98 abc"), Err(InputError::BadLevels(_))));
        assert!(matches!(parse_submission(&scenario, "98 NaN"), Err(InputError::BadLevels(_))));
    }

    #[test]
    fn test_pattern_choice_or_name() {
        let pattern = ScenarioGenerator::seeded(3).pattern();
        let second = pattern.choices[1];
        let scenario = Scenario::Pattern(pattern);

        assert_eq!(parse_submission(&scenario, "2"), Ok(Submission::Pattern(second)));
        assert_eq!(parse_submission(&scenario, "5"), Err(InputError::ChoiceOutOfRange(5)));
        assert_eq!(parse_submission(&scenario, "0"), Err(InputError::ChoiceOutOfRange(0)));

        let offered = third_choice_name(&scenario);
        assert_eq!(
            parse_submission(&scenario, &offered.to_lowercase()),
            Ok(Submission::Pattern(PatternLabel::from_name(&offered).unwrap()))
        );
        assert!(matches!(parse_submission(&scenario, "cup and handle"), Err(InputError::Unrecognized(_))));
    }

    #[test]
    fn test_pattern_name_must_be_offered() {
        let pattern = ScenarioGenerator::seeded(4).pattern();
        let missing = PatternLabel::ALL
            .into_iter()
            .find(|label| !pattern.choices.contains(label))
            .unwrap();
        let scenario = Scenario::Pattern(pattern);

        assert_eq!(
            parse_submission(&scenario, missing.name()),
            Err(InputError::NotAChoice(missing.name().to_string()))
        );
    }

    fn third_choice_name(scenario: &Scenario) -> String {
        match scenario {
            Scenario::Pattern(pattern) => pattern.choices[2].name().to_string(),
            _ => unreachable!(),
        }
    }
}
