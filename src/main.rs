//! Terminal snapshot of the dashboard.
//!
//! `cryptovault` prints the symbol table; `cryptovault BTCUSDT [7d|30d|90d]`
//! prints the analysis summary for one symbol.

use cryptovault::config::Config;
use cryptovault::dashboard::{Dashboard, Screen, ScreenData};
use cryptovault::logging;
use cryptovault::models::Period;
use cryptovault::render::{AnalysisView, RecordingSurface, SymbolRow};
use cryptovault::services::HttpMarketApi;
use dotenvy::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    let api = Arc::new(HttpMarketApi::new(&config.backend_url)?);
    let mut dashboard = Dashboard::new(api, RecordingSurface::new(), config.render.clone());

    let mut args = std::env::args().skip(1);
    let screen = match args.next() {
        Some(symbol) => {
            let period = Period::parse_or_default(args.next().as_deref());
            Screen::analysis(symbol.to_uppercase(), period)
        }
        None => Screen::SymbolList,
    };

    let output = dashboard.navigate(screen).await;
    if let Some(error) = &output.error {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
    match output.data {
        Some(ScreenData::Symbols(rows)) => print_symbols(&rows),
        Some(ScreenData::Analysis(view)) => print_analysis(&view),
        None => {}
    }
    Ok(())
}

fn print_symbols(rows: &[SymbolRow]) {
    println!(
        "{:<12} {:>16} {:>10} {:>12} {:>12}",
        "Symbol", "Price", "Change", "Volume", "Trades"
    );
    for row in rows {
        println!(
            "{:<12} {:>16} {:>10} {:>12} {:>12}",
            row.symbol, row.price, row.change, row.volume, row.trades
        );
    }
}

fn print_analysis(view: &AnalysisView) {
    println!("{} ({})", view.symbol, view.period);
    println!("  Price: {} ({})", view.price, view.change);
    println!(
        "  Recommendation: {} (confidence {}%)",
        view.recommendation.text, view.confidence
    );
    for tf in &view.timeframes {
        println!(
            "  {:<8} {:<6} buy {} / sell {} / hold {}",
            tf.timeframe.title(),
            tf.signal.category,
            tf.tally.buy,
            tf.tally.sell,
            tf.tally.hold
        );
    }
    if let Some(sentiment) = &view.sentiment {
        println!(
            "  Sentiment: {} {} [{}]",
            sentiment.score, sentiment.label, sentiment.signal.category
        );
    }
    if let Some(prediction) = &view.prediction {
        println!(
            "  Forecast: {} -> {} ({})",
            prediction.current_price, prediction.target_price, prediction.expected_change
        );
    }
}
