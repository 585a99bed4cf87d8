// Desktop chart data: fetch one symbol and print every timeframe
use tracing::{info, warn};

use trade_reflex::feed::KNOWN_SYMBOLS;
use trade_reflex::progress::Spinner;
use trade_reflex::{ChartFeed, Config, FeedSource, ReflexResult};

use crate::render;

pub async fn show_chart(symbol: Option<String>, config: &Config) -> ReflexResult<()> {
    let symbol = symbol
        .unwrap_or_else(|| config.feed.default_symbol.clone())
        .to_uppercase();
    if !KNOWN_SYMBOLS.contains(&symbol.as_str()) && !config.feed.symbols.contains(&symbol) {
        warn!("⚠️  {} is not in the symbol list, asking the server anyway", symbol);
    }

    let mut feed = ChartFeed::new(&config.feed)?;
    let spinner = Spinner::new(&format!("Loading {} from {}...", symbol, feed.base_url()));
    let load = feed.load(&symbol).await;

    match load.source {
        FeedSource::Live | FeedSource::Cached => spinner.finish(&format!("{} chart data loaded", load.symbol)),
        FeedSource::Fallback => spinner.finish_with_warning(&format!(
            "Could not load data: {}. Showing fallback data.",
            load.error.as_deref().unwrap_or("unknown error")
        )),
    }

    for (name, chart) in load.payload.timeframes() {
        println!("\n📈 {} {} ({} candles)", load.symbol, name, chart.candles.len());
        for row in render::feed_rows(&chart.candles) {
            println!("{}", row);
        }
        if !chart.sr_levels.is_empty() {
            let levels: Vec<String> = chart.sr_levels.iter().map(|l| format!("{:.2}", l)).collect();
            println!("  S/R levels: {}", levels.join(", "));
        }
    }

    if let Some(close) = load.payload.one_day.last_close() {
        info!("💵 {} last daily close: {:.2}", load.symbol, close);
    }
    Ok(())
}
