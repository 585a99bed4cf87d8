//! Async session driver
//!
//! Owns the only timer in the system: a one-second interval created for each
//! scenario and dropped as soon as it is answered, so two countdowns never
//! overlap. Player input arrives on an mpsc channel. After each answer the
//! feedback stays up for the configured delay; input that arrives meanwhile
//! hits the controller's duplicate guard and is discarded.

use std::time::Duration;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ReflexError, ReflexResult};
use super::controller::{SessionController, SessionEvent};
use super::evaluator::Submission;
use super::mode::TrainingMode;
use super::score::SessionSummary;

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SessionRunner {
    feedback_delay: Duration,
}

impl SessionRunner {
    pub fn new(feedback_delay: Duration) -> Self {
        Self { feedback_delay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_millis(config.session.feedback_delay_ms))
    }

    /// Play one whole session of `mode`, reporting every event to `observer`.
    /// If `inputs` closes, the remaining scenarios run out on their timers.
    pub async fn run<R, F>(
        &self,
        controller: &mut SessionController<R>,
        mode: TrainingMode,
        inputs: &mut mpsc::Receiver<Submission>,
        mut observer: F,
    ) -> ReflexResult<SessionSummary>
    where
        R: Rng,
        F: FnMut(&SessionEvent, &SessionController<R>),
    {
        let first = controller.start(mode)?;
        observer(&first, &*controller);
        let mut inputs_open = true;

        loop {
            let mut ticker = time::interval_at(Instant::now() + SECOND, SECOND);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while controller.is_awaiting_input() {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Some(event) = controller.tick()? {
                            observer(&event, &*controller);
                        }
                    }
                    received = inputs.recv(), if inputs_open => {
                        match received {
                            Some(submission) => match controller.submit(submission) {
                                Ok(Some(feedback)) => observer(&SessionEvent::Feedback(feedback), &*controller),
                                Ok(None) => {}
                                Err(err @ ReflexError::InvalidSubmission(..)) => warn!("⚠️  {}", err),
                                Err(err) => return Err(err),
                            },
                            None => {
                                debug!("Input channel closed, remaining scenarios will time out");
                                inputs_open = false;
                            }
                        }
                    }
                }
            }
            drop(ticker);

            let pause = time::sleep(self.feedback_delay);
            tokio::pin!(pause);
            loop {
                tokio::select! {
                    _ = &mut pause => break,
                    received = inputs.recv(), if inputs_open => {
                        match received {
                            Some(submission) => {
                                controller.submit(submission)?;
                            }
                            None => inputs_open = false,
                        }
                    }
                }
            }

            let event = controller
                .advance()
                .ok_or_else(|| ReflexError::Internal("session did not advance after feedback".to_string()))?;
            observer(&event, &*controller);

            if let SessionEvent::Completed(summary) = event {
                return Ok(summary);
            }
        }
    }
}
