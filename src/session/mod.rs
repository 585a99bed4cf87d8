//! Training sessions: modes, scoring, the session state machine and its driver

pub mod mode;
pub mod evaluator;
pub mod score;
pub mod controller;
pub mod runner;
pub mod input;

pub use controller::{ActiveSession, Feedback, SessionController, SessionEvent, SessionPhase, SessionState};
pub use evaluator::{Evaluation, Evaluator, RiskReason, Submission, Verdict};
pub use input::{parse_submission, InputError};
pub use mode::TrainingMode;
pub use runner::SessionRunner;
pub use score::{MasteryStats, PatternMastery, Scoreboard, SessionSummary};
