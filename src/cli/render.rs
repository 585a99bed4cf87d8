// Text rendering for charts, prompts, feedback and summaries

use chrono::DateTime;
use trade_reflex::feed::FeedCandle;
use trade_reflex::scenario::risk::ENTRY_INDEX;
use trade_reflex::{
    Candle, Direction, Feedback, RiskScenario, Scenario, SessionSummary, TrainingMode, Verdict,
};

const CHART_WIDTH: usize = 32;

fn column(price: f64, low: f64, high: f64) -> usize {
    if high <= low {
        return CHART_WIDTH / 2;
    }
    (((price - low) / (high - low)) * (CHART_WIDTH - 1) as f64).round() as usize
}

/// One row per candle: wick as `─`, body as `█` (up) or `▒` (down)
pub fn candle_rows(candles: &[Candle]) -> Vec<String> {
    let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let mut row = vec![' '; CHART_WIDTH];
            let (wick_lo, wick_hi) = (column(candle.low, low, high), column(candle.high, low, high));
            let body_lo = column(candle.open.min(candle.close), low, high);
            let body_hi = column(candle.open.max(candle.close), low, high);
            let body = if candle.is_bullish() { '█' } else { '▒' };

            for cell in row.iter_mut().take(wick_hi + 1).skip(wick_lo) {
                *cell = '─';
            }
            for cell in row.iter_mut().take(body_hi + 1).skip(body_lo) {
                *cell = body;
            }

            format!(
                "{:>3} │{}│ {:>8.2} {}",
                i + 1,
                row.into_iter().collect::<String>(),
                candle.close,
                if candle.is_bullish() { "▲" } else { "▼" }
            )
        })
        .collect()
}

/// Chart and answer prompt for the scenario the player is facing
pub fn scenario_prompt(scenario: &Scenario, index: usize, total: usize) -> String {
    let mut lines = vec![format!("━━━ {} {}/{} ━━━", scenario.mode().label(), index + 1, total)];

    match scenario {
        Scenario::Speed(speed) => {
            lines.extend(candle_rows(&speed.candles));
            lines.push("👉 [b]uy  [s]ell  s[k]ip".to_string());
        }
        Scenario::Risk(risk) => {
            let visible = &risk.candles[..(ENTRY_INDEX + 1).min(risk.candles.len())];
            lines.extend(candle_rows(visible));
            lines.extend(risk_prompt(risk));
        }
        Scenario::Pattern(pattern) => {
            lines.push(format!("Timeframe: {}", pattern.timeframe));
            lines.extend(candle_rows(&pattern.candles));
            for (i, choice) in pattern.choices.iter().enumerate() {
                lines.push(format!("  {}) {}", i + 1, choice));
            }
            lines.push("👉 Pick 1-4 (or type the pattern name)".to_string());
        }
    }

    lines.join("\n")
}

fn risk_prompt(risk: &RiskScenario) -> Vec<String> {
    let side = match risk.direction {
        Direction::Long => "LONG",
        Direction::Short => "SHORT",
    };
    let (stop_lo, stop_hi) = risk.stop_bounds();
    let (tp_lo, tp_hi) = risk.target_bounds();

    vec![
        format!("🎯 {} entry at {:.2}", side, risk.entry),
        format!("   stop {:.2}..{:.2}   target {:.2}..{:.2}", stop_lo, stop_hi, tp_lo, tp_hi),
        "👉 <stop> <target> [size 1-10]".to_string(),
    ]
}

pub fn feedback_line(feedback: &Feedback) -> String {
    let mark = if feedback.evaluation.correct { "✅" } else { "❌" };
    let timeout = if feedback.timed_out { " (time's up)" } else { "" };

    let detail = match &feedback.evaluation.verdict {
        Verdict::Risk { levels, rr, .. } => {
            format!(" | RR {:.2}, size {}", rr, levels.size)
        }
        Verdict::Speed { submitted, .. } => format!(" | you: {}", submitted),
        Verdict::Pattern { selected, .. } => format!(" | you: {}", selected),
    };

    format!(
        "{} {}{}{} | {:+} XP → {} | streak {}",
        mark,
        feedback.evaluation.reason(),
        timeout,
        detail,
        feedback.xp_delta,
        feedback.xp,
        feedback.streak
    )
}

pub fn summary_lines(summary: &SessionSummary) -> Vec<String> {
    let mut lines = vec![
        format!("🏁 {} complete", summary.mode.label()),
        format!("   XP:        {}", summary.xp),
        format!("   Correct:   {}/{}", summary.correct, summary.scenarios),
        format!("   Accuracy:  {}%", summary.accuracy_pct),
        format!("   Streak:    {} (best {})", summary.streak, summary.best_streak),
        match summary.avg_reaction_secs {
            Some(secs) => format!("   Reaction:  {:.1}s avg", secs),
            None => "   Reaction:  -".to_string(),
        },
    ];

    if let Some(mastery) = &summary.mastery {
        lines.push("   Pattern mastery:".to_string());
        for (label, stats) in mastery.iter().filter(|(_, s)| s.total > 0) {
            lines.push(format!(
                "     {:<22} {}/{}  {:>3.0}%  {:.1}s",
                label.name(),
                stats.correct,
                stats.total,
                stats.accuracy().unwrap_or(0.0) * 100.0,
                stats.avg_time
            ));
        }
    }
    lines
}

pub fn mode_line(mode: TrainingMode, time_limit: u32, scenarios: usize) -> String {
    format!(
        "{:<14} {:<32} {:>3}s × {}",
        mode.label(),
        mode.description(),
        time_limit,
        scenarios
    )
}

/// Compact table of feed candles with their indicators
pub fn feed_rows(candles: &[FeedCandle]) -> Vec<String> {
    candles
        .iter()
        .map(|c| {
            let time = DateTime::from_timestamp(c.time, 0)
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| c.time.to_string());
            let indicator = |value: Option<f64>| value.map_or("-".to_string(), |v| format!("{:.2}", v));
            format!(
                "  {}  O {:>8.2}  H {:>8.2}  L {:>8.2}  C {:>8.2}  VWAP {:>8}  EMA9 {:>8}",
                time, c.open, c.high, c.low, c.close, indicator(c.vwap), indicator(c.ema9)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trade_reflex::{PatternLabel, PatternMastery, ScoringConfig, Scoreboard};
    use uuid::Uuid;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle { time: 0, open, high, low, close }
    }

    #[test]
    fn test_candle_rows_scale_to_range() {
        let rows = candle_rows(&[candle(100.0, 101.0, 99.0, 100.5), candle(100.5, 102.0, 100.0, 100.1)]);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains('█'));
        assert!(rows[1].contains('▒'));
        assert!(rows[0].ends_with('▲'));
        assert!(rows[1].ends_with('▼'));
    }

    #[test]
    fn test_summary_lists_mastery_accuracy() {
        let scoring = ScoringConfig::default();
        let mut board = Scoreboard::default();
        let mut mastery = PatternMastery::default();
        board.record(true, Some(2.0), &scoring);
        mastery.record(PatternLabel::DoubleTop, true, Some(2.0));
        board.record(false, None, &scoring);
        mastery.record(PatternLabel::DoubleTop, false, None);
        let summary =
            SessionSummary::new(Uuid::new_v4(), TrainingMode::Pattern, 2, &board, Some(mastery), Utc::now());

        let lines = summary_lines(&summary);
        let row = lines.iter().find(|l| l.contains("Double Top")).expect("mastery row");
        assert!(row.contains("1/2"));
        assert!(row.contains(" 50%"));
        assert!(!lines.iter().any(|l| l.contains("Bull Flag")));
    }

    #[test]
    fn test_flat_chart_does_not_panic() {
        let rows = candle_rows(&[candle(100.0, 100.0, 100.0, 100.0)]);
        assert_eq!(rows.len(), 1);
    }
}
