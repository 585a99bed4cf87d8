// Training modes and their per-mode session rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ModeSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    Speed,    // Buy / sell / skip on a 20-candle trend
    Risk,     // Stop, target and size around an entry
    Pattern,  // Multiple-choice chart pattern recognition
}

impl TrainingMode {
    pub const ALL: [TrainingMode; 3] = [TrainingMode::Speed, TrainingMode::Risk, TrainingMode::Pattern];

    pub fn label(&self) -> &'static str {
        match self {
            TrainingMode::Speed => "Speed Mode",
            TrainingMode::Risk => "Risk Manager",
            TrainingMode::Pattern => "Pattern Snap",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrainingMode::Speed => "5s trades, instant feedback",
            TrainingMode::Risk => "Fast stop/TP, position sizing",
            TrainingMode::Pattern => "Pattern recognition drills",
        }
    }

    /// Built-in countdown and batch size
    pub fn default_settings(&self) -> ModeSettings {
        match self {
            TrainingMode::Speed => ModeSettings { time_limit_secs: 5, scenarios: 10 },
            TrainingMode::Risk => ModeSettings { time_limit_secs: 10, scenarios: 10 },
            TrainingMode::Pattern => ModeSettings { time_limit_secs: 7, scenarios: 15 },
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speed" | "speed-mode" => Ok(TrainingMode::Speed),
            "risk" | "risk-manager" => Ok(TrainingMode::Risk),
            "pattern" | "pattern-snap" => Ok(TrainingMode::Pattern),
            other => Err(format!("unknown training mode '{}' (expected speed, risk or pattern)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Speed".parse::<TrainingMode>(), Ok(TrainingMode::Speed));
        assert_eq!("risk-manager".parse::<TrainingMode>(), Ok(TrainingMode::Risk));
        assert_eq!("pattern".parse::<TrainingMode>(), Ok(TrainingMode::Pattern));
        assert!("scalp".parse::<TrainingMode>().is_err());
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(TrainingMode::Speed.default_settings().time_limit_secs, 5);
        assert_eq!(TrainingMode::Risk.default_settings().time_limit_secs, 10);
        assert_eq!(TrainingMode::Pattern.default_settings().time_limit_secs, 7);
        assert_eq!(TrainingMode::Pattern.default_settings().scenarios, 15);
    }
}
