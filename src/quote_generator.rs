//! Stochastic price perturbation: bounded uniform drift, sampled and
//! applied per asset, with non-finite results rejected.

use crate::asset_quote::AssetQuote;
use crate::defs::{
    CHANGE_PCT_DECIMALS, MARKET_CAP_CHANGE_BOUND, PRICE_CHANGE_BOUND, VOLUME_CHANGE_BOUND,
};
use crate::errors::GeneratorError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;

/// Tuning knobs for the perturbation model.
///
/// Every bound must be finite and lie in `(0, 1)`; ratios are drawn
/// uniformly from `[-bound, +bound]` and applied multiplicatively, so a
/// bound below 1 guarantees a positive input stays positive.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Bound on the per-tick price ratio (default ±1.5%).
    pub price_bound: f64,
    /// Bound on the per-tick volume ratio (default ±10%).
    pub volume_bound: f64,
    /// Bound on the per-tick market-cap ratio (default ±5%).
    pub market_cap_bound: f64,
    /// Fractional digits kept in `change_pct` (default 2).
    pub round_decimals: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            price_bound: PRICE_CHANGE_BOUND,
            volume_bound: VOLUME_CHANGE_BOUND,
            market_cap_bound: MARKET_CAP_CHANGE_BOUND,
            round_decimals: CHANGE_PCT_DECIMALS,
        }
    }
}

/// One tick's worth of sampled ratios for a single asset.
///
/// Sampling is separated from application so that a caller (or a test)
/// can apply a known drift without involving an RNG.
#[derive(Debug, Clone, Copy)]
pub struct Drift {
    /// Relative price move, in `[-price_bound, +price_bound]`.
    pub price_ratio: f64,
    /// Relative volume move.
    pub volume_ratio: f64,
    /// Relative market-cap move.
    pub market_cap_ratio: f64,
}

impl Drift {
    /// The drift that leaves every field unchanged.
    pub fn zero() -> Self {
        Self {
            price_ratio: 0.0,
            volume_ratio: 0.0,
            market_cap_ratio: 0.0,
        }
    }
}

/// Stochastic quote perturbation model.
///
/// Produces the next generation of quotes from the current one using a
/// bounded uniform random walk. Each asset is perturbed independently;
/// no correlation is modeled between assets or between fields.
#[derive(Debug, Clone)]
pub struct QuoteGenerator {
    config: GeneratorConfig,
}

impl QuoteGenerator {
    /// Creates a new generator.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidBound`] if any bound is not a
    /// finite value in `(0.0, 1.0)`.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        for bound in [
            config.price_bound,
            config.volume_bound,
            config.market_cap_bound,
        ] {
            if !bound.is_finite() || bound <= 0.0 || bound >= 1.0 {
                return Err(GeneratorError::InvalidBound(bound));
            }
        }
        Ok(Self { config })
    }

    /// Samples one asset's drift: three independent uniform draws.
    pub fn sample_drift<R: Rng + ?Sized>(&self, rng: &mut R) -> Drift {
        Drift {
            price_ratio: rng.gen_range(-self.config.price_bound..=self.config.price_bound),
            volume_ratio: rng.gen_range(-self.config.volume_bound..=self.config.volume_bound),
            market_cap_ratio: rng
                .gen_range(-self.config.market_cap_bound..=self.config.market_cap_bound),
        }
    }

    /// Applies a drift to a quote, producing the next quote.
    ///
    /// `change_pct` is the price ratio expressed in percent and rounded to
    /// the configured number of decimals.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NonFinite`] if any resulting field is
    /// non-finite or non-positive; the caller keeps the prior quote.
    pub fn apply_drift(
        &self,
        quote: &AssetQuote,
        drift: Drift,
    ) -> Result<AssetQuote, GeneratorError> {
        let price = quote.price * (1.0 + drift.price_ratio);
        let volume = quote.volume * (1.0 + drift.volume_ratio);
        let market_cap = quote.market_cap * (1.0 + drift.market_cap_ratio);
        let change_pct = round_to(drift.price_ratio * 100.0, self.config.round_decimals);

        check_field(&quote.symbol, "price", price)?;
        check_field(&quote.symbol, "volume", volume)?;
        check_field(&quote.symbol, "market_cap", market_cap)?;
        if !change_pct.is_finite() {
            return Err(GeneratorError::NonFinite {
                symbol: quote.symbol.clone(),
                field: "change_pct",
            });
        }

        Ok(AssetQuote {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            price,
            change_pct,
            volume,
            market_cap,
        })
    }

    /// Computes the next generation of quotes for a whole board snapshot.
    ///
    /// Assets are perturbed in parallel, each worker with its own RNG. An
    /// asset whose update is rejected is logged and omitted from the
    /// result, so its prior quote stays on the board; one bad asset never
    /// aborts the tick for the others.
    pub fn next_quotes(&self, current: &[AssetQuote]) -> HashMap<String, AssetQuote> {
        current
            .par_iter()
            .filter_map(|quote| {
                let mut rng = StdRng::from_entropy();
                let drift = self.sample_drift(&mut rng);
                match self.apply_drift(quote, drift) {
                    Ok(next) => Some((next.symbol.clone(), next)),
                    Err(e) => {
                        log::warn!("Skipping update for {}: {}", quote.symbol, e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn check_field(symbol: &str, field: &'static str, value: f64) -> Result<(), GeneratorError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeneratorError::NonFinite {
            symbol: symbol.to_string(),
            field,
        });
    }
    Ok(())
}

/// Rounds to `decimals` fractional digits, half away from zero.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
