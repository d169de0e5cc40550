//! # Synthetic Live-Market Ticker Engine
//!
//! This crate implements the core of a live-market ticker display: a small
//! rolling set of asset quotes perturbed on a fixed cadence by a bounded
//! random walk, a pause gate driven by user interaction, and pure
//! formatting helpers for currency and percentage display.
//!
//! ## Features
//!
//! - Fixed symbol universe seeded at initialization (built-in set or file).
//! - Background scheduler perturbing all quotes every tick (8 s default).
//! - Interaction-driven pause gate: ticks are skipped, never queued.
//! - Ordered, atomically-updated quote board with cheap read snapshots.
//! - Per-asset failure isolation: a bad numeric result retains the prior
//!   quote for that asset and never aborts the tick for the others.
//! - Graceful, idempotent shutdown that releases the timer thread.
//! - Thread-safe architecture using `Arc`, `RwLock`, and atomics.
//!
//! ## Architecture Overview
//!
//! The crate is organized into several modules:
//!
//! - [`asset_quote`](crate::asset_quote) — data model for a tracked asset.
//! - [`quote_board`](crate::quote_board) — ordered symbol → quote store.
//! - [`quote_generator`](crate::quote_generator) — stochastic perturbation model.
//! - [`ticker_engine`](crate::ticker_engine) — tick scheduler, pause gate, lifecycle.
//! - [`display`](crate::display) — pure currency/percentage formatting.
//! - [`defs`](crate::defs) — shared constants and default tuning parameters.
//! - [`errors`](crate::errors) — error types used across modules.
//!
//! ## Update Loop
//!
//! The engine runs one background thread that, every tick period:
//!
//! 1. Skips entirely if the pause gate is engaged.
//! 2. Snapshots the board and computes a new generation of quotes, each
//!    asset perturbed independently within configured bounds.
//! 3. Applies the whole batch under a single write guard, so concurrent
//!    snapshots observe all of a tick's changes or none of them.
//!
//! ## Example: Running the Engine
//!
//! ```no_run
//! use std::sync::Arc;
//! use market_ticker::asset_quote::default_assets;
//! use market_ticker::display::{format_change_pct, format_currency};
//! use market_ticker::ticker_engine::{EngineConfig, TickerEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Arc::new(TickerEngine::new(default_assets(), EngineConfig::default())?);
//!     engine.start()?;
//!
//!     // The presentation layer reads snapshots whenever it re-renders...
//!     for quote in engine.snapshot() {
//!         println!(
//!             "{} {} {}",
//!             quote.symbol,
//!             format_currency(quote.price, false),
//!             format_change_pct(quote.change_pct),
//!         );
//!     }
//!
//!     // ...pauses updates while the user hovers the ticker...
//!     engine.set_interacting(true);
//!     engine.set_interacting(false);
//!
//!     // ...and stops the timer when the view goes away.
//!     engine.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unreachable_pub)]

pub mod asset_quote;
pub mod defs;
pub mod display;
pub mod errors;
pub mod quote_board;
pub mod quote_generator;
pub mod ticker_engine;
