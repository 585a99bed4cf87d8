// Feedback evaluation: compare a submission with the scenario's ground truth

use std::fmt;

use crate::core::types::{Direction, PatternLabel, RiskOutcome, TradeAction};
use crate::error::{ReflexError, ReflexResult};
use crate::scenario::risk::{reward_risk, RiskLevels, RiskScenario};
use crate::scenario::Scenario;

/// A player's answer to the current scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submission {
    Action(TradeAction),
    Levels(RiskLevels),
    Pattern(PatternLabel),
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Action(_) => "trade action",
            Submission::Levels(_) => "stop/target",
            Submission::Pattern(_) => "pattern",
        }
    }

    /// What gets submitted when the countdown runs out
    pub fn timeout_for(scenario: &Scenario) -> Self {
        match scenario {
            Scenario::Speed(_) => Submission::Action(TradeAction::Skip),
            Scenario::Risk(risk) => Submission::Levels(risk.timeout_levels()),
            Scenario::Pattern(_) => Submission::Pattern(PatternLabel::NoPattern),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskReason {
    InvalidLevels,
    PoorRewardRisk { min: f64 },
    TargetHit,
    StoppedOut,
    NoOutcome,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskReason::InvalidLevels => f.write_str("Stop/TP not valid"),
            RiskReason::PoorRewardRisk { min } => write!(f, "RR < {}", min),
            RiskReason::TargetHit => f.write_str("TP hit!"),
            RiskReason::StoppedOut => f.write_str("Stopped out"),
            RiskReason::NoOutcome => f.write_str("No outcome"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Speed {
        expected: TradeAction,
        submitted: TradeAction,
    },
    Risk {
        reason: RiskReason,
        levels: RiskLevels,
        rr: f64,
        outcome: RiskOutcome,
    },
    Pattern {
        expected: PatternLabel,
        selected: PatternLabel,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub correct: bool,
    pub verdict: Verdict,
}

impl Evaluation {
    /// One-line explanation shown with the feedback
    pub fn reason(&self) -> String {
        match &self.verdict {
            Verdict::Speed { expected, .. } => format!("Answer: {}", expected.as_str().to_uppercase()),
            Verdict::Risk { reason, .. } => reason.to_string(),
            Verdict::Pattern { expected, .. } => format!("Answer: {}", expected),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    min_reward_risk: f64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl Evaluator {
    pub fn new(min_reward_risk: f64) -> Self {
        Self { min_reward_risk }
    }

    pub fn evaluate(&self, scenario: &Scenario, submission: &Submission) -> ReflexResult<Evaluation> {
        match (scenario, submission) {
            (Scenario::Speed(speed), Submission::Action(action)) => Ok(Evaluation {
                correct: *action == speed.answer,
                verdict: Verdict::Speed {
                    expected: speed.answer,
                    submitted: *action,
                },
            }),
            (Scenario::Risk(risk), Submission::Levels(levels)) => Ok(self.evaluate_risk(risk, *levels)),
            (Scenario::Pattern(pattern), Submission::Pattern(selected)) => Ok(Evaluation {
                correct: *selected == pattern.pattern,
                verdict: Verdict::Pattern {
                    expected: pattern.pattern,
                    selected: *selected,
                },
            }),
            (scenario, submission) => Err(ReflexError::InvalidSubmission(
                scenario.mode().label().to_string(),
                submission.kind().to_string(),
            )),
        }
    }

    /// Levels must straddle the entry on the right sides and pay at least the minimum RR
    pub fn evaluate_risk(&self, scenario: &RiskScenario, levels: RiskLevels) -> Evaluation {
        let entry = scenario.entry;
        let ordered = match scenario.direction {
            Direction::Long => levels.stop < entry && entry < levels.tp,
            Direction::Short => levels.tp < entry && entry < levels.stop,
        };
        let rr = reward_risk(entry, levels.stop, levels.tp);

        let reason = if !ordered {
            RiskReason::InvalidLevels
        } else if rr < self.min_reward_risk {
            RiskReason::PoorRewardRisk { min: self.min_reward_risk }
        } else {
            match scenario.outcome {
                RiskOutcome::Tp => RiskReason::TargetHit,
                RiskOutcome::Stop => RiskReason::StoppedOut,
                RiskOutcome::None => RiskReason::NoOutcome,
            }
        };

        Evaluation {
            correct: ordered && rr >= self.min_reward_risk,
            verdict: Verdict::Risk {
                reason,
                levels,
                rr,
                outcome: scenario.outcome,
            },
        }
    }
}
