//! Error types used across modules.

use thiserror::Error;

/// Errors raised while building the [`QuoteBoard`](crate::quote_board::QuoteBoard)
/// from a seed asset list.
#[derive(Error, Debug)]
pub enum BoardError {
    /// The seed list contains no assets. The symbol universe is fixed at
    /// initialization, so an empty board could never display anything.
    #[error("Seed asset list is empty")]
    EmptySeed,

    /// Two seed entries share the same symbol. Symbols are the board keys
    /// and must be unique.
    #[error("Duplicate symbol in seed: {0}")]
    DuplicateSymbol(String),
}

/// Errors that may occur inside the [`QuoteGenerator`](crate::quote_generator::QuoteGenerator).
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A perturbation bound is outside the allowed numeric range.
    ///
    /// Bounds must be finite and lie in `(0.0, 1.0)`; a bound of 1.0 or
    /// more would let a single tick drive a value to zero or below.
    #[error("Perturbation bound out of range, expected a finite value in (0, 1): {0}")]
    InvalidBound(f64),

    /// A perturbation produced a non-finite or non-positive field value.
    ///
    /// The caller retains the prior quote for the affected asset; other
    /// assets are unaffected.
    #[error("Perturbation produced an unusable {field} for {symbol}")]
    NonFinite {
        /// Symbol of the asset whose update was rejected.
        symbol: String,
        /// Name of the offending quote field.
        field: &'static str,
    },
}

/// Errors returned from the [`TickerEngine`](crate::ticker_engine::TickerEngine).
///
/// These cover seed validation, misconfiguration, and seed-file loading.
/// No runtime error is surfaced through this type: per-asset update
/// failures are recovered inside the tick and only logged.
#[derive(Error, Debug)]
pub enum TickerEngineError {
    /// The seed asset list was rejected; the engine does not start.
    #[error("Invalid seed: {0}")]
    InvalidSeed(#[from] BoardError),

    /// The engine configuration carries an unusable perturbation bound.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(#[from] GeneratorError),

    /// The seed file could not be read or parsed.
    #[error("Failed to load seed file: {0}")]
    SeedFile(String),
}

/// High-level errors returned by the demo binary.
///
/// Used at the application entry point for formatting user-facing error
/// messages and wrapping lower-level failures.
#[derive(Error, Debug)]
pub enum CliError {
    /// General wrapper around any textual failure.
    #[error("Ticker demo failed with error: {0}")]
    GeneralError(String),
}

impl From<TickerEngineError> for CliError {
    fn from(err: TickerEngineError) -> Self {
        CliError::GeneralError(err.to_string())
    }
}
