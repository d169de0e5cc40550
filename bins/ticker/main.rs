//! # Ticker Demo
//!
//! Terminal presentation layer for the market ticker engine. It starts the
//! engine over the built-in asset set (or a seed file), then re-renders the
//! board on a fixed refresh cadence while the engine perturbs prices in the
//! background.
//!
//! ## Command-line Options
//! - `--config` / `-c`: optional seed file (`SYMBOL,Name,price,volume,market_cap` per line).
//! - `--tick-sec` / `-t`: engine tick period in seconds (default 8).
//! - `--refresh-sec` / `-r`: render period in seconds (default 2).
//! - `--rounds` / `-n`: number of renders before exiting (0 = run until killed).
//! - `--json` / `-j`: emit each snapshot as a JSON line instead of a table.
//! - `--log-level` / `-l`: log level (`error`, `warn`, `info`, `debug`, `trace`).

use market_ticker::asset_quote::{default_assets, AssetQuote};
use market_ticker::display::{format_change_pct, format_currency};
use market_ticker::errors::CliError;
use market_ticker::ticker_engine::{EngineConfig, TickerEngine};

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use structopt::StructOpt;

/// Command-line options for the ticker demo
#[derive(Debug, StructOpt)]
#[structopt(name = "ticker", about = "Terminal demo for the market ticker engine")]
struct Opt {
    /// Optional seed file with one asset per line
    #[structopt(short, long)]
    config: Option<String>,

    /// Engine tick period in seconds
    #[structopt(short, long, default_value = "8")]
    tick_sec: u64,

    /// Render period in seconds
    #[structopt(short, long, default_value = "2")]
    refresh_sec: u64,

    /// Number of renders before exiting (0 = run until killed)
    #[structopt(short = "n", long, default_value = "0")]
    rounds: u64,

    /// Emit snapshots as JSON lines instead of a table
    #[structopt(short, long)]
    json: bool,

    /// Log level: error, warn, info, debug, trace
    #[structopt(short, long, default_value = "info")]
    log_level: String,
}

/// Initializes the logger using env_logger with the given level
fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();

    let log_level = match level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    builder.filter_level(log_level);
    builder.format_timestamp_micros();
    builder.format_module_path(false);
    builder.format_target(false);
    builder.init();
}

/// Glyph shown next to a symbol. The engine knows nothing about icons;
/// this lookup belongs to the presentation layer, with a generic
/// currency sign for symbols it has never heard of.
fn asset_glyph(symbol: &str) -> &'static str {
    match symbol {
        "BTC" => "₿",
        "ETH" => "Ξ",
        "SOL" => "◎",
        "ADA" => "₳",
        "DOT" => "●",
        "AVAX" => "▲",
        "LINK" => "⬡",
        _ => "¤",
    }
}

/// Renders one quote as a ticker row.
fn render_row(quote: &AssetQuote) -> String {
    let trend = if quote.is_up() { "▲" } else { "▼" };
    format!(
        "{} {:<5} {:<10} {:>14} {} {:>8}  Vol: {:>9}  MCap: {:>9}",
        asset_glyph(&quote.symbol),
        quote.symbol,
        quote.name,
        format_currency(quote.price, false),
        trend,
        format_change_pct(quote.change_pct),
        format_currency(quote.volume, true),
        format_currency(quote.market_cap, true),
    )
}

fn render(engine: &TickerEngine, json: bool) -> Result<(), CliError> {
    let quotes = engine.snapshot();
    if json {
        let line = serde_json::to_string(&quotes)
            .map_err(|e| CliError::GeneralError(e.to_string()))?;
        println!("{}", line);
    } else {
        println!("─── Live Markets ───────────────────────────────────────");
        for quote in &quotes {
            println!("{}", render_row(quote));
        }
        println!();
    }
    Ok(())
}

fn main() -> Result<(), CliError> {
    let opt = Opt::from_args();
    init_logger(&opt.log_level);

    log::info!("Starting ticker demo");
    log::debug!("Command line options: {:?}", opt);

    let config = EngineConfig {
        tick_period: Duration::from_secs(opt.tick_sec),
        ..EngineConfig::default()
    };

    let engine = match &opt.config {
        Some(path) => TickerEngine::from_config(path, config)?,
        None => TickerEngine::new(default_assets(), config)?,
    };
    let engine = Arc::new(engine);
    engine.start()?;

    let refresh = Duration::from_secs(opt.refresh_sec.max(1));
    let mut round = 0u64;
    loop {
        render(&engine, opt.json)?;
        round += 1;
        if opt.rounds != 0 && round >= opt.rounds {
            break;
        }
        thread::sleep(refresh);
    }

    engine.shutdown();
    log::info!("Ticker demo finished after {} renders", round);
    Ok(())
}
