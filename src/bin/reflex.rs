// Trade Reflex - terminal trainer
// Single entry point for the training modes and the chart viewer

use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{error, info, Level};
use trade_reflex::{Config, ReflexResult, TrainingMode};

// Load command modules from cli directory
#[path = "../cli/render.rs"]
mod render;
#[path = "../cli/play_commands.rs"]
mod play_commands;
#[path = "../cli/chart_commands.rs"]
mod chart_commands;

#[derive(Parser)]
#[command(name = "reflex")]
#[command(version = "0.3.0")]
#[command(about = "Timed trading-reflex drills on synthetic charts", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "reflex.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// List training modes
    Modes,

    /// Play a training session
    Play {
        /// speed, risk or pattern
        mode: TrainingMode,

        /// Seed for reproducible scenarios
        #[arg(long)]
        seed: Option<u64>,

        /// Number of scenarios in the session
        #[arg(short = 'n', long)]
        scenarios: Option<usize>,
    },

    /// Show multi-timeframe chart data for a symbol
    Chart {
        /// Ticker symbol (defaults to feed.default_symbol)
        symbol: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its level applies; errors are reported after
    let loaded = load_config(&cli.config);
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        loaded
            .as_ref()
            .ok()
            .and_then(|config| config.logging.level.parse::<Level>().ok())
            .unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(e) = run(cli, loaded).await {
        error!("❌ {} error", e.category());
        error!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, loaded: ReflexResult<Config>) -> ReflexResult<()> {
    match cli.command {
        // Init doesn't require config (it creates it)
        Commands::Init => init_config(&cli.config),
        Commands::Modes => {
            list_modes(&loaded?);
            Ok(())
        }
        Commands::Play { mode, seed, scenarios } => {
            play_commands::play(mode, seed, scenarios, loaded?).await
        }
        Commands::Chart { symbol } => chart_commands::show_chart(symbol, &loaded?).await,
    }
}

/// Config file if present, otherwise built-in defaults
fn load_config(path: &str) -> ReflexResult<Config> {
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }
    Ok(Config::from_file(path)?)
}

fn init_config(path: &str) -> ReflexResult<()> {
    info!("🔧 Initializing configuration...");
    let existed = Path::new(path).exists();
    Config::load_or_create(path)?;

    if existed {
        info!("📁 {} already exists and is valid", path);
    } else {
        info!("📝 Created {}", path);
    }
    info!("💡 Next steps:");
    info!("   1. Adjust time limits and scoring in {}", path);
    info!("   2. Run: reflex modes");
    info!("   3. Run: reflex play speed");
    Ok(())
}

fn list_modes(config: &Config) {
    info!("📋 Training modes:");
    for mode in TrainingMode::ALL {
        let settings = config.modes.settings(mode);
        println!("  {}", render::mode_line(mode, settings.time_limit_secs, settings.scenarios));
    }
}
