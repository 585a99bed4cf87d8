// Core domain types shared by the generator, session and feed modules

pub mod types;

// Re-export commonly used types
pub use types::{Candle, Direction, PatternLabel, RiskOutcome, Timeframe, TradeAction};
