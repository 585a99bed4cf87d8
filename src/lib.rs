// Trade Reflex Library
//
// Timed trading-reflex drills on synthetic candlestick charts: Speed Mode,
// Risk Manager and Pattern Snap, plus a multi-timeframe chart feed client

pub mod core;
pub mod config;
pub mod error;       // Unified error handling
pub mod scenario;
pub mod session;
pub mod feed;
pub mod progress;    // Terminal countdown and spinner

// Re-export core types
pub use core::{Candle, Direction, PatternLabel, RiskOutcome, Timeframe, TradeAction};

// Re-export error types
pub use error::{ReflexError, ReflexResult};

// Re-export configuration
pub use config::{Config, ConfigError, FeedConfig, LoggingConfig, ModeSettings, ModesConfig, ScoringConfig, SessionConfig};

// Re-export scenario generation
pub use scenario::{
    PatternScenario, RiskLevels, RiskScenario, Scenario, ScenarioGenerator, SpeedScenario, WalkProfile,
};

// Re-export session components
pub use session::{
    parse_submission, Evaluation, Evaluator, Feedback, InputError, PatternMastery, Scoreboard,
    SessionController, SessionEvent, SessionPhase, SessionRunner, SessionSummary, Submission,
    TrainingMode, Verdict,
};

// Re-export chart feed
pub use feed::{ChartFeed, ChartPayload, FeedError, FeedLoad, FeedSource, TimeframeChart};
