// XP, streaks, reaction times and pattern mastery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::core::types::PatternLabel;
use super::mode::TrainingMode;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub xp: i64,
    pub streak: u32,
    pub best_streak: u32,
    pub correct: u32,
    pub attempts: u32,
    pub reaction_times: Vec<f64>,
}

impl Scoreboard {
    /// Apply one scored attempt; returns the XP delta
    pub fn record(&mut self, correct: bool, reaction_time: Option<f64>, scoring: &ScoringConfig) -> i64 {
        self.attempts += 1;
        if let Some(secs) = reaction_time {
            self.reaction_times.push(secs.max(0.0));
        }

        let delta = if correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            scoring.xp_correct
        } else {
            self.streak = 0;
            -scoring.xp_penalty
        };

        self.xp += delta;
        delta
    }

    pub fn average_reaction(&self) -> Option<f64> {
        if self.reaction_times.is_empty() {
            None
        } else {
            Some(self.reaction_times.iter().sum::<f64>() / self.reaction_times.len() as f64)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MasteryStats {
    pub correct: u32,
    pub total: u32,
    pub avg_time: f64,   // Over explicit answers only
    timed: u32,
}

impl MasteryStats {
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }
}

/// Per-label recognition record for Pattern Snap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMastery {
    stats: BTreeMap<PatternLabel, MasteryStats>,
}

impl Default for PatternMastery {
    fn default() -> Self {
        Self {
            stats: PatternLabel::ALL
                .iter()
                .map(|label| (*label, MasteryStats::default()))
                .collect(),
        }
    }
}

impl PatternMastery {
    pub fn record(&mut self, label: PatternLabel, correct: bool, reaction_time: Option<f64>) {
        let entry = self.stats.entry(label).or_default();
        entry.total += 1;
        if correct {
            entry.correct += 1;
        }
        if let Some(secs) = reaction_time {
            entry.avg_time = (entry.avg_time * entry.timed as f64 + secs) / (entry.timed + 1) as f64;
            entry.timed += 1;
        }
    }

    pub fn get(&self, label: PatternLabel) -> MasteryStats {
        self.stats.get(&label).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatternLabel, &MasteryStats)> {
        self.stats.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub mode: TrainingMode,
    pub scenarios: usize,
    pub xp: i64,
    pub streak: u32,
    pub best_streak: u32,
    pub correct: u32,
    pub accuracy_pct: u32,
    pub avg_reaction_secs: Option<f64>,
    pub mastery: Option<PatternMastery>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(
        id: Uuid,
        mode: TrainingMode,
        scenarios: usize,
        score: &Scoreboard,
        mastery: Option<PatternMastery>,
        started_at: DateTime<Utc>,
    ) -> Self {
        // Share of scenarios answered correctly, independent of the XP values in use
        let accuracy_pct = if scenarios == 0 {
            0
        } else {
            (score.correct as f64 / scenarios as f64 * 100.0).round() as u32
        };

        Self {
            id,
            mode,
            scenarios,
            xp: score.xp,
            streak: score.streak,
            best_streak: score.best_streak,
            correct: score.correct,
            accuracy_pct,
            avg_reaction_secs: score.average_reaction(),
            mastery,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
