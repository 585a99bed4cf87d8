// Interactive training session in the terminal
use std::io::BufRead;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{info, warn};

use trade_reflex::progress::CountdownBar;
use trade_reflex::{
    parse_submission, Config, ReflexResult, Scenario, SessionController, SessionEvent, SessionRunner,
    Submission, TrainingMode,
};

use crate::render;

pub async fn play(
    mode: TrainingMode,
    seed: Option<u64>,
    scenarios: Option<usize>,
    mut config: Config,
) -> ReflexResult<()> {
    if seed.is_some() {
        config.session.seed = seed;
    }
    if let Some(count) = scenarios {
        match mode {
            TrainingMode::Speed => config.modes.speed.scenarios = count,
            TrainingMode::Risk => config.modes.risk.scenarios = count,
            TrainingMode::Pattern => config.modes.pattern.scenarios = count,
        }
    }
    config.validate()?;

    let settings = config.modes.settings(mode);
    info!("🎮 {}: {} scenarios, {}s each", mode.label(), settings.scenarios, settings.time_limit_secs);
    if let Some(seed) = config.session.seed {
        info!("🎲 Seed: {}", seed);
    }

    let current: Arc<Mutex<Option<Scenario>>> = Arc::new(Mutex::new(None));
    let mut inputs = spawn_stdin_reader(Arc::clone(&current));

    let mut controller = SessionController::from_config(&config);
    let runner = SessionRunner::from_config(&config);
    let mut countdown: Option<CountdownBar> = None;

    let summary = runner
        .run(&mut controller, mode, &mut inputs, |event, controller| match event {
            SessionEvent::ScenarioStarted { index, total, time_limit } => {
                if let Some(scenario) = controller.current_scenario() {
                    println!("\n{}", render::scenario_prompt(scenario, *index, *total));
                    if let Ok(mut slot) = current.lock() {
                        *slot = Some(scenario.clone());
                    }
                }
                countdown = Some(CountdownBar::new(*time_limit, mode.label()));
            }
            SessionEvent::Tick { remaining } => {
                if let Some(bar) = &countdown {
                    bar.set_remaining(*remaining);
                }
            }
            SessionEvent::Feedback(feedback) => {
                if let Some(bar) = countdown.take() {
                    bar.clear();
                }
                if let Ok(mut slot) = current.lock() {
                    *slot = None;
                }
                println!("{}", render::feedback_line(feedback));
            }
            SessionEvent::Completed(summary) => {
                println!();
                for line in render::summary_lines(summary) {
                    println!("{}", line);
                }
            }
        })
        .await?;

    info!("✅ Session {} finished with {} XP", summary.id, summary.xp);
    Ok(())
}

/// Read stdin lines on a background thread and forward those that parse as
/// an answer to the scenario currently on screen
fn spawn_stdin_reader(current: Arc<Mutex<Option<Scenario>>>) -> mpsc::Receiver<Submission> {
    let (tx, rx) = mpsc::channel(8);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };

            let parsed = match current.lock() {
                Ok(slot) => slot.as_ref().map(|scenario| parse_submission(scenario, &line)),
                Err(_) => break,
            };

            match parsed {
                Some(Ok(submission)) => {
                    if tx.blocking_send(submission).is_err() {
                        break;
                    }
                }
                Some(Err(err)) => warn!("⚠️  {}", err),
                None => {}
            }
        }
    });

    rx
}
