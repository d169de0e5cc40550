//! The update scheduler: owns the quote board, runs the periodic tick on
//! a background thread, and exposes the pause gate and shutdown.

use crate::asset_quote::AssetQuote;
use crate::defs::TICK_PERIOD_SEC;
use crate::errors::TickerEngineError;
use crate::quote_board::QuoteBoard;
use crate::quote_generator::{GeneratorConfig, QuoteGenerator};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

/// Engine configuration: the tick cadence plus the perturbation bounds.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Period between price ticks. Defaults to 8 seconds.
    pub tick_period: Duration,
    /// Perturbation model settings.
    pub generator: GeneratorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(TICK_PERIOD_SEC),
            generator: GeneratorConfig::default(),
        }
    }
}

/// The ticker engine: an owned quote board, a perturbation model, and a
/// background scheduler that drives periodic ticks.
///
/// An `Arc<TickerEngine>` is the handle handed to the presentation layer:
/// it exposes [`snapshot`](Self::snapshot) for reads,
/// [`set_interacting`](Self::set_interacting) for the pause gate, and
/// [`shutdown`](Self::shutdown) to stop the timer. Ticks run on a single
/// background thread, so they are serialized by construction; a tick
/// takes the board's write lock only while applying its batch of updates.
#[derive(Debug)]
pub struct TickerEngine {
    quotes: RwLock<QuoteBoard>,
    generator: QuoteGenerator,
    tick_period: Duration,

    /// Pause gate set by the presentation layer during user interaction.
    paused: AtomicBool,

    /// Background scheduler thread.
    bg_thread: Mutex<Option<JoinHandle<()>>>,
    /// Signals the scheduler thread to stop between ticks.
    stop_tx: Mutex<Option<Sender<()>>>,
}

impl TickerEngine {
    /// Builds an engine over a seed asset list. Does not start the timer.
    ///
    /// # Errors
    /// * [`TickerEngineError::InvalidSeed`] for an empty seed or a
    ///   duplicate symbol.
    /// * [`TickerEngineError::InvalidConfig`] for an unusable
    ///   perturbation bound.
    pub fn new(seed: Vec<AssetQuote>, config: EngineConfig) -> Result<Self, TickerEngineError> {
        let generator = QuoteGenerator::new(config.generator)?;
        let board = QuoteBoard::new(seed)?;

        log::info!(
            "Ticker engine initialized with {} assets (tick period: {:?})",
            board.len(),
            config.tick_period
        );

        Ok(Self {
            quotes: RwLock::new(board),
            generator,
            tick_period: config.tick_period,
            paused: AtomicBool::new(false),
            bg_thread: Mutex::new(None),
            stop_tx: Mutex::new(None),
        })
    }

    /// Builds an engine from a seed file (one asset per line).
    ///
    /// Line format: `SYMBOL,Name,price,volume,market_cap`. Blank lines
    /// are skipped; a malformed line fails the whole load.
    pub fn from_config<P: AsRef<std::path::Path>>(
        path: P,
        config: EngineConfig,
    ) -> Result<Self, TickerEngineError> {
        log::info!("Loading seed assets from: {:?}", path.as_ref());
        let file =
            File::open(&path).map_err(|e| TickerEngineError::SeedFile(e.to_string()))?;
        let reader = BufReader::new(file);

        let mut seed = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| TickerEngineError::SeedFile(e.to_string()))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            seed.push(parse_seed_line(trimmed)?);
        }

        log::info!("Loaded {} seed assets", seed.len());
        Self::new(seed, config)
    }

    /// Starts the background scheduler thread.
    ///
    /// Starting an engine that is already running is a logged no-op. The
    /// thread waits on an internal channel with the tick period as the
    /// timeout: a timeout is a tick, a stop signal ends the loop, so
    /// [`shutdown`](Self::shutdown) never has to wait out a full period.
    pub fn start(self: &Arc<Self>) -> Result<(), TickerEngineError> {
        let mut guard = self.bg_thread.lock().unwrap();
        if guard.is_some() {
            log::warn!("Ticker engine scheduler already running");
            return Ok(());
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        *self.stop_tx.lock().unwrap() = Some(stop_tx);

        let engine = Arc::clone(self);
        let period = self.tick_period;

        log::info!("Starting ticker scheduler with tick period: {:?}", period);
        let handle = std::thread::spawn(move || {
            log::debug!("Ticker scheduler thread started");
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => engine.tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::debug!("Ticker scheduler thread stopped");
        });

        *guard = Some(handle);
        Ok(())
    }

    /// Runs one tick: skip while paused, otherwise perturb every quote
    /// and apply the batch.
    fn tick(&self) {
        if self.paused.load(Ordering::SeqCst) {
            log::trace!("Tick skipped: user interaction in progress");
            return;
        }

        // Compute the next generation outside any lock; only the final
        // application holds the write guard, keeping readers' wait bounded.
        let current = match self.quotes.read() {
            Ok(board) => board.snapshot(),
            Err(e) => {
                log::error!("Quote board read lock poisoned, skipping tick: {}", e);
                return;
            }
        };
        let updates = self.generator.next_quotes(&current);

        let applied = match self.quotes.write() {
            Ok(mut board) => board.apply_updates(updates),
            Err(e) => {
                log::error!("Quote board write lock poisoned, skipping tick: {}", e);
                return;
            }
        };

        if applied < current.len() {
            log::warn!("Applied {} of {} quote updates", applied, current.len());
        } else {
            log::debug!("Applied {} quote updates", applied);
        }
    }

    /// Returns a read-only copy of all quotes in display order.
    ///
    /// May run concurrently with other snapshots; between ticks two
    /// snapshots are equal.
    pub fn snapshot(&self) -> Vec<AssetQuote> {
        self.quotes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot()
    }

    /// The pause gate. While `active` the scheduler skips ticks; the
    /// first tick after release runs on the normal cadence (skipped
    /// ticks are lost, not queued).
    pub fn set_interacting(&self, active: bool) {
        self.paused.store(active, Ordering::SeqCst);
        log::debug!(
            "Interaction gate {}",
            if active { "engaged" } else { "released" }
        );
    }

    /// Whether the engine is currently paused by user interaction.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Stops the scheduler and joins its thread. Idempotent.
    ///
    /// No tick fires after this returns, and an in-flight tick finishes
    /// applying before the thread is joined, so the board is never left
    /// partially updated.
    pub fn shutdown(&self) {
        let sender = self.stop_tx.lock().unwrap().take();
        if let Some(tx) = sender {
            log::info!("Initiating ticker engine shutdown");
            let _ = tx.send(());
        }

        if let Some(handle) = self.bg_thread.lock().unwrap().take() {
            handle.join().ok();
            log::info!("Ticker scheduler thread joined");
        }
    }
}

impl Drop for TickerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn parse_seed_line(line: &str) -> Result<AssetQuote, TickerEngineError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(TickerEngineError::SeedFile(format!(
            "expected 5 fields, got {}: {:?}",
            parts.len(),
            line
        )));
    }

    let parse_number = |field: &str, raw: &str| -> Result<f64, TickerEngineError> {
        raw.parse::<f64>().map_err(|e| {
            TickerEngineError::SeedFile(format!("bad {} in {:?}: {}", field, line, e))
        })
    };

    let price = parse_number("price", parts[2])?;
    let volume = parse_number("volume", parts[3])?;
    let market_cap = parse_number("market_cap", parts[4])?;
    Ok(AssetQuote::new(parts[0], parts[1], price, volume, market_cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_quote::default_assets;
    use crate::defs::PRICE_CHANGE_BOUND;
    use crate::errors::BoardError;
    use std::io::Write;
    use std::thread;
    use tempfile::NamedTempFile;

    const TEST_TICK: Duration = Duration::from_millis(25);

    fn test_config() -> EngineConfig {
        EngineConfig {
            tick_period: TEST_TICK,
            ..EngineConfig::default()
        }
    }

    fn started_engine() -> Arc<TickerEngine> {
        let engine = Arc::new(TickerEngine::new(default_assets(), test_config()).unwrap());
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_rejects_empty_seed() {
        let result = TickerEngine::new(Vec::new(), test_config());
        assert!(matches!(
            result,
            Err(TickerEngineError::InvalidSeed(BoardError::EmptySeed))
        ));
    }

    #[test]
    fn test_rejects_bad_generator_config() {
        let mut config = test_config();
        config.generator.price_bound = 2.0;
        let result = TickerEngine::new(default_assets(), config);
        assert!(matches!(result, Err(TickerEngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_snapshot_idempotent_without_tick() {
        let engine = TickerEngine::new(default_assets(), test_config()).unwrap();
        assert_eq!(engine.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_ticks_mutate_within_envelope() {
        let engine = started_engine();
        let before = engine.snapshot();

        thread::sleep(TEST_TICK * 6);
        let after = engine.snapshot();
        engine.shutdown();

        assert_ne!(before, after);
        assert_eq!(after.len(), before.len());
        for (prev, next) in before.iter().zip(&after) {
            // Display order is stable across ticks.
            assert_eq!(prev.symbol, next.symbol);
            assert!(next.price > 0.0);
            assert!(next.volume > 0.0);
            assert!(next.market_cap > 0.0);
            assert_eq!(next.is_up(), next.change_pct >= 0.0);
            assert!(next.change_pct.abs() <= PRICE_CHANGE_BOUND * 100.0);
        }
    }

    #[test]
    fn test_pause_gate_skips_ticks() {
        let engine = started_engine();

        engine.set_interacting(true);
        assert!(engine.is_paused());
        let before = engine.snapshot();

        thread::sleep(TEST_TICK * 4);
        assert_eq!(engine.snapshot(), before);

        engine.set_interacting(false);
        assert!(!engine.is_paused());
        thread::sleep(TEST_TICK * 4);
        assert_ne!(engine.snapshot(), before);

        engine.shutdown();
    }

    #[test]
    fn test_shutdown_stops_ticks_and_is_idempotent() {
        let engine = started_engine();
        thread::sleep(TEST_TICK * 2);

        engine.shutdown();
        let frozen = engine.snapshot();
        thread::sleep(TEST_TICK * 4);
        assert_eq!(engine.snapshot(), frozen);

        // A second shutdown is a no-op.
        engine.shutdown();
    }

    #[test]
    fn test_start_twice_is_noop() {
        let engine = started_engine();
        engine.start().unwrap();
        engine.shutdown();
    }

    #[test]
    fn test_from_config_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "BTC,Bitcoin,64289.78,32456789012,1265789012345").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "ETH,Ethereum,3412.56,14567890123,412567890123").unwrap();

        let engine = TickerEngine::from_config(file.path(), test_config()).unwrap();
        let quotes = engine.snapshot();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "BTC");
        assert_eq!(quotes[0].price, 64289.78);
        assert_eq!(quotes[1].symbol, "ETH");
    }

    #[test]
    fn test_from_config_malformed_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "BTC,Bitcoin,not-a-price,1,1").unwrap();

        let result = TickerEngine::from_config(file.path(), test_config());
        assert!(matches!(result, Err(TickerEngineError::SeedFile(_))));
    }

    #[test]
    fn test_from_config_missing_file() {
        let result = TickerEngine::from_config("no_such_seed_file.csv", test_config());
        assert!(matches!(result, Err(TickerEngineError::SeedFile(_))));
    }
}
