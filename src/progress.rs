//! Terminal progress widgets
//!
//! A draining countdown bar for the scenario timer and a spinner for the
//! chart feed request, both built on indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

/// Countdown for the current scenario; the bar empties as time runs out
pub struct CountdownBar {
    pub progress: ProgressBar,
    time_limit: u32,
}

impl CountdownBar {
    pub fn new(time_limit: u32, label: &str) -> Self {
        let progress = ProgressBar::new(time_limit as u64);
        progress.set_style(bar_style("⏱️  [{bar:30.green/red}] {pos}s {msg}"));
        progress.set_position(time_limit as u64);
        progress.set_message(label.to_string());

        Self { progress, time_limit }
    }

    /// Hidden bar for non-interactive output
    pub fn hidden(time_limit: u32) -> Self {
        Self {
            progress: ProgressBar::hidden(),
            time_limit,
        }
    }

    pub fn set_remaining(&self, remaining: u32) {
        self.progress.set_position(remaining.min(self.time_limit) as u64);
        if remaining <= 2 {
            self.progress.set_style(bar_style("⏱️  [{bar:30.red/red}] {pos}s {msg}"));
        }
    }

    pub fn finish(&self, message: &str) {
        self.progress.finish_with_message(message.to_string());
    }

    /// Remove the bar so feedback can print on a clean line
    pub fn clear(&self) {
        self.progress.finish_and_clear();
    }
}

/// Spinner for quick operations
pub struct Spinner {
    pub spinner: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(message.to_string());

        Self { spinner }
    }

    /// Finish spinner with success
    pub fn finish(&self, message: &str) {
        self.spinner.finish_with_message(format!("✅ {}", message));
    }

    /// Finish spinner with a warning; used when fallback data is shown
    pub fn finish_with_warning(&self, message: &str) {
        self.spinner.finish_with_message(format!("⚠️  {}", message));
    }
}
