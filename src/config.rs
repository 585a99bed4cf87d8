// Configuration management for the trainer

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::session::mode::TrainingMode;

/// Countdown and batch size for one training mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    pub time_limit_secs: u32,
    pub scenarios: usize,
}

// A `[modes.*]` table as written; missing fields fall back to that mode's defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialModeSettings {
    time_limit_secs: Option<u32>,
    scenarios: Option<usize>,
}

impl PartialModeSettings {
    fn or_defaults(self, mode: TrainingMode) -> ModeSettings {
        let defaults = mode.default_settings();
        ModeSettings {
            time_limit_secs: self.time_limit_secs.unwrap_or(defaults.time_limit_secs),
            scenarios: self.scenarios.unwrap_or(defaults.scenarios),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialModesConfig {
    speed: PartialModeSettings,
    risk: PartialModeSettings,
    pattern: PartialModeSettings,
}

impl From<PartialModesConfig> for ModesConfig {
    fn from(partial: PartialModesConfig) -> Self {
        Self {
            speed: partial.speed.or_defaults(TrainingMode::Speed),
            risk: partial.risk.or_defaults(TrainingMode::Risk),
            pattern: partial.pattern.or_defaults(TrainingMode::Pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialModesConfig")]
pub struct ModesConfig {
    pub speed: ModeSettings,
    pub risk: ModeSettings,
    pub pattern: ModeSettings,
}

impl Default for ModesConfig {
    fn default() -> Self {
        Self {
            speed: TrainingMode::Speed.default_settings(),
            risk: TrainingMode::Risk.default_settings(),
            pattern: TrainingMode::Pattern.default_settings(),
        }
    }
}

impl ModesConfig {
    pub fn settings(&self, mode: TrainingMode) -> ModeSettings {
        match mode {
            TrainingMode::Speed => self.speed,
            TrainingMode::Risk => self.risk,
            TrainingMode::Pattern => self.pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub xp_correct: i64,         // Awarded on a correct answer
    pub xp_penalty: i64,         // Deducted on a miss
    pub min_reward_risk: f64,    // Risk Manager pass mark
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            xp_correct: 10,
            xp_penalty: 5,
            min_reward_risk: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub feedback_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 1500,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub default_symbol: String,
    pub symbols: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 300,
            default_symbol: "AAPL".to_string(),
            symbols: ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA", "META", "NFLX"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub enable_tick_logging: bool,
    pub enable_feedback_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_tick_logging: false,
            enable_feedback_logging: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub modes: ModesConfig,
    pub scoring: ScoringConfig,
    pub session: SessionConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            info!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in TrainingMode::ALL {
            let settings = self.modes.settings(mode);
            if settings.time_limit_secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "{}: time_limit_secs must be greater than 0",
                    mode.label()
                )));
            }
            if settings.scenarios == 0 {
                return Err(ConfigError::Validation(format!(
                    "{}: scenarios must be greater than 0",
                    mode.label()
                )));
            }
        }

        if self.scoring.xp_correct <= 0 {
            return Err(ConfigError::Validation("xp_correct must be positive".to_string()));
        }

        if self.scoring.xp_penalty < 0 {
            return Err(ConfigError::Validation("xp_penalty must be non-negative".to_string()));
        }

        if !(self.scoring.min_reward_risk > 0.0) {
            return Err(ConfigError::Validation("min_reward_risk must be positive".to_string()));
        }

        if self.feed.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("feed base_url must not be empty".to_string()));
        }

        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::Validation("feed timeout_secs must be greater than 0".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
