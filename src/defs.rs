//! Shared constants and default tuning parameters.

/// Default period between price ticks, in seconds.
///
/// Every tick the engine perturbs all tracked quotes once. While the user
/// is interacting with the ticker the tick is skipped entirely; skipped
/// ticks are lost, never queued.
pub const TICK_PERIOD_SEC: u64 = 8;

/// Default bound on the per-tick price move.
///
/// The price ratio is drawn uniformly from `[-bound, +bound]`, so the
/// default simulates moves of up to ±1.5% per tick.
pub const PRICE_CHANGE_BOUND: f64 = 0.015;

/// Default bound on the per-tick trading volume move (±10%).
pub const VOLUME_CHANGE_BOUND: f64 = 0.10;

/// Default bound on the per-tick market capitalization move (±5%).
pub const MARKET_CAP_CHANGE_BOUND: f64 = 0.05;

/// Number of fractional digits `change_pct` is rounded to after a tick.
pub const CHANGE_PCT_DECIMALS: u32 = 2;

/// Magnitude from which compact currency notation (`$1.27B`) kicks in
/// when requested by the caller.
pub const COMPACT_THRESHOLD: f64 = 1_000_000.0;
