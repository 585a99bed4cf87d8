//! Session state machine
//!
//! `Idle → Running → Summary → Idle`. While running, the controller owns the
//! scenario batch, the countdown for the current scenario and the score. It
//! is driven from outside: one `tick()` per elapsed second, `submit()` for
//! player input and `advance()` once the feedback has been on screen long
//! enough. See [`super::runner`] for the async driver.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, LoggingConfig, ModesConfig, ScoringConfig};
use crate::error::{ReflexError, ReflexResult};
use crate::scenario::{Scenario, ScenarioGenerator};
use super::evaluator::{Evaluation, Evaluator, Submission};
use super::mode::TrainingMode;
use super::score::{PatternMastery, Scoreboard, SessionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Summary,
}

/// Result of one scored attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub index: usize,
    pub evaluation: Evaluation,
    pub timed_out: bool,
    pub xp_delta: i64,
    pub xp: i64,
    pub streak: u32,
    pub reaction_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ScenarioStarted {
        index: usize,
        total: usize,
        time_limit: u32,
    },
    Tick {
        remaining: u32,
    },
    Feedback(Feedback),
    Completed(SessionSummary),
}

#[derive(Debug, Clone)]
pub struct ActiveSession {
    id: Uuid,
    mode: TrainingMode,
    scenarios: Vec<Scenario>,
    index: usize,
    time_limit: u32,
    remaining: u32,
    answered: Option<Feedback>,
    score: Scoreboard,
    mastery: PatternMastery,
    started_at: DateTime<Utc>,
}

impl ActiveSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenarios[self.index]
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn mastery(&self) -> &PatternMastery {
        &self.mastery
    }

    fn summarize(&self) -> SessionSummary {
        let mastery = (self.mode == TrainingMode::Pattern).then(|| self.mastery.clone());
        SessionSummary::new(
            self.id,
            self.mode,
            self.scenarios.len(),
            &self.score,
            mastery,
            self.started_at,
        )
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Running(ActiveSession),
    Summary(SessionSummary),
}

pub struct SessionController<R: Rng = StdRng> {
    generator: ScenarioGenerator<R>,
    evaluator: Evaluator,
    modes: ModesConfig,
    scoring: ScoringConfig,
    logging: LoggingConfig,
    state: SessionState,
}

impl SessionController<StdRng> {
    /// Controller seeded from `session.seed` when set
    pub fn from_config(config: &Config) -> Self {
        Self::new(ScenarioGenerator::from_seed_option(config.session.seed), config)
    }
}

impl<R: Rng> SessionController<R> {
    pub fn new(generator: ScenarioGenerator<R>, config: &Config) -> Self {
        Self {
            generator,
            evaluator: Evaluator::new(config.scoring.min_reward_risk),
            modes: config.modes.clone(),
            scoring: config.scoring.clone(),
            logging: config.logging.clone(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Running(_) => SessionPhase::Running,
            SessionState::Summary(_) => SessionPhase::Summary,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Running(active) => Some(active),
            _ => None,
        }
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.active().map(ActiveSession::scenario)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.active().map(ActiveSession::remaining)
    }

    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.active().map(ActiveSession::score)
    }

    /// Waiting for the player on the current scenario
    pub fn is_awaiting_input(&self) -> bool {
        self.active().map_or(false, |active| active.answered.is_none())
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.state {
            SessionState::Summary(summary) => Some(summary),
            _ => None,
        }
    }

    /// Generate a fresh batch and show its first scenario
    pub fn start(&mut self, mode: TrainingMode) -> ReflexResult<SessionEvent> {
        if let SessionState::Running(active) = &self.state {
            return Err(ReflexError::SessionInProgress(active.mode.label().to_string()));
        }

        let settings = self.modes.settings(mode);
        let scenarios = self.generator.batch(mode, settings.scenarios.max(1));
        let active = ActiveSession {
            id: Uuid::new_v4(),
            mode,
            scenarios,
            index: 0,
            time_limit: settings.time_limit_secs,
            remaining: settings.time_limit_secs,
            answered: None,
            score: Scoreboard::default(),
            mastery: PatternMastery::default(),
            started_at: Utc::now(),
        };

        info!("🚀 {} session {} started: {} scenarios, {}s each",
              mode.label(), active.id, active.total(), active.time_limit);

        let event = SessionEvent::ScenarioStarted {
            index: 0,
            total: active.total(),
            time_limit: active.time_limit,
        };
        self.state = SessionState::Running(active);
        Ok(event)
    }

    /// One second elapsed. On the last second the timeout answer is scored.
    pub fn tick(&mut self) -> ReflexResult<Option<SessionEvent>> {
        let SessionState::Running(active) = &mut self.state else {
            return Ok(None);
        };
        if active.answered.is_some() {
            return Ok(None);
        }

        if active.remaining <= 1 {
            active.remaining = 0;
            let submission = Submission::timeout_for(active.scenario());
            debug!("⏰ Scenario {} timed out, submitting {}", active.index + 1, submission.kind());
            let feedback = Self::score_attempt(
                &self.evaluator,
                &self.scoring,
                &self.logging,
                active,
                submission,
                true,
            )?;
            return Ok(Some(SessionEvent::Feedback(feedback)));
        }

        active.remaining -= 1;
        if self.logging.enable_tick_logging {
            debug!("⏱️  {}s left on scenario {}", active.remaining, active.index + 1);
        }
        Ok(Some(SessionEvent::Tick {
            remaining: active.remaining,
        }))
    }

    /// Score a player answer. A second answer to the same scenario returns `Ok(None)`.
    pub fn submit(&mut self, submission: Submission) -> ReflexResult<Option<Feedback>> {
        let SessionState::Running(active) = &mut self.state else {
            return Err(ReflexError::NoActiveSession);
        };
        if active.answered.is_some() {
            debug!("Ignoring duplicate {} submission for scenario {}", submission.kind(), active.index + 1);
            return Ok(None);
        }

        let feedback = Self::score_attempt(
            &self.evaluator,
            &self.scoring,
            &self.logging,
            active,
            submission,
            false,
        )?;
        Ok(Some(feedback))
    }

    fn score_attempt(
        evaluator: &Evaluator,
        scoring: &ScoringConfig,
        logging: &LoggingConfig,
        active: &mut ActiveSession,
        submission: Submission,
        timed_out: bool,
    ) -> ReflexResult<Feedback> {
        let scenario = &active.scenarios[active.index];
        let evaluation = evaluator.evaluate(scenario, &submission)?;

        let reaction_time = if timed_out {
            None
        } else {
            Some(active.time_limit.saturating_sub(active.remaining) as f64)
        };

        let xp_delta = active.score.record(evaluation.correct, reaction_time, scoring);
        if let Scenario::Pattern(pattern) = scenario {
            active.mastery.record(pattern.pattern, evaluation.correct, reaction_time);
        }

        if logging.enable_feedback_logging {
            info!("{} Scenario {}/{}: {} ({:+} XP, streak {})",
                  if evaluation.correct { "✅" } else { "❌" },
                  active.index + 1, active.scenarios.len(),
                  evaluation.reason(), xp_delta, active.score.streak);
        }

        let feedback = Feedback {
            index: active.index,
            evaluation,
            timed_out,
            xp_delta,
            xp: active.score.xp,
            streak: active.score.streak,
            reaction_time,
        };
        active.answered = Some(feedback.clone());
        Ok(feedback)
    }

    /// Move past an answered scenario: next one, or the summary after the last
    pub fn advance(&mut self) -> Option<SessionEvent> {
        let SessionState::Running(active) = &mut self.state else {
            return None;
        };
        active.answered.as_ref()?;

        if active.index + 1 < active.scenarios.len() {
            active.index += 1;
            active.remaining = active.time_limit;
            active.answered = None;
            return Some(SessionEvent::ScenarioStarted {
                index: active.index,
                total: active.scenarios.len(),
                time_limit: active.time_limit,
            });
        }

        let summary = active.summarize();
        info!("🏁 {} session complete: {} XP, {}% accuracy",
              summary.mode.label(), summary.xp, summary.accuracy_pct);
        self.state = SessionState::Summary(summary.clone());
        Some(SessionEvent::Completed(summary))
    }

    /// Back to the home screen; any running session or summary is discarded
    pub fn return_home(&mut self) {
        if let SessionState::Running(active) = &self.state {
            info!("↩️  Abandoning {} session at scenario {}", active.mode.label(), active.index + 1);
        }
        self.state = SessionState::Idle;
    }
}
