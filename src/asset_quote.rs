//! Asset quote data model and the built-in seed set.

use serde::{Deserialize, Serialize};

/// The full state of one tracked asset at a point in time.
///
/// An `AssetQuote` is the unit the engine stores, perturbs, and hands to
/// the presentation layer. All monetary fields are plain `f64` values:
/// this is a display simulation, not precision financial arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Short unique identifier (e.g., `"BTC"`). Board key.
    pub symbol: String,

    /// Human-readable display name (e.g., `"Bitcoin"`).
    pub name: String,

    /// Current unit price. Strictly positive after every update.
    pub price: f64,

    /// Percentage move applied on the most recent tick, rounded to the
    /// configured number of decimals (2 by default). Signed.
    pub change_pct: f64,

    /// Simulated trading volume. Strictly positive after every update.
    pub volume: f64,

    /// Simulated market capitalization. Strictly positive after every update.
    pub market_cap: f64,
}

impl AssetQuote {
    /// Creates a seed quote with no move recorded yet (`change_pct` is 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use market_ticker::asset_quote::AssetQuote;
    /// let quote = AssetQuote::new("BTC", "Bitcoin", 64289.78, 32456789012.0, 1265789012345.0);
    /// assert_eq!(quote.symbol, "BTC");
    /// assert!(quote.is_up());
    /// ```
    pub fn new(symbol: &str, name: &str, price: f64, volume: f64, market_cap: f64) -> Self {
        AssetQuote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_pct: 0.0,
            volume,
            market_cap,
        }
    }

    /// Whether the most recent move was upward.
    ///
    /// Derived from `change_pct` on every call (`change_pct >= 0`), so it
    /// can never disagree with the stored move.
    pub fn is_up(&self) -> bool {
        self.change_pct >= 0.0
    }
}

/// The built-in seed set: seven large-cap crypto assets with realistic
/// starting prices, volumes, and market caps.
///
/// Useful for demos and tests that do not load a seed file.
pub fn default_assets() -> Vec<AssetQuote> {
    let mut assets = vec![
        AssetQuote::new("BTC", "Bitcoin", 64289.78, 32456789012.0, 1265789012345.0),
        AssetQuote::new("ETH", "Ethereum", 3412.56, 14567890123.0, 412567890123.0),
        AssetQuote::new("SOL", "Solana", 142.89, 3456789012.0, 64567890123.0),
        AssetQuote::new("ADA", "Cardano", 0.4523, 567890123.0, 15678901234.0),
        AssetQuote::new("DOT", "Polkadot", 6.78, 234567890.0, 8456789012.0),
        AssetQuote::new("AVAX", "Avalanche", 35.21, 789012345.0, 13456789012.0),
        AssetQuote::new("LINK", "Chainlink", 14.56, 345678901.0, 8456789012.0),
    ];

    // Pre-seeded moves so the board shows direction before the first tick.
    let initial_changes = [2.34, -1.12, 5.67, -0.89, 3.45, 7.12, -2.34];
    for (asset, change) in assets.iter_mut().zip(initial_changes) {
        asset.change_pct = change;
    }
    assets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_follows_change_pct() {
        let mut quote = AssetQuote::new("BTC", "Bitcoin", 100.0, 100.0, 100.0);
        assert!(quote.is_up());

        quote.change_pct = -0.01;
        assert!(!quote.is_up());

        quote.change_pct = 1.5;
        assert!(quote.is_up());

        // IEEE negative zero still counts as non-negative.
        quote.change_pct = -0.0;
        assert!(quote.is_up());
    }

    #[test]
    fn test_default_assets_shape() {
        let assets = default_assets();
        assert_eq!(assets.len(), 7);
        assert_eq!(assets[0].symbol, "BTC");
        assert_eq!(assets[3].symbol, "ADA");
        for asset in &assets {
            assert!(asset.price > 0.0);
            assert!(asset.volume > 0.0);
            assert!(asset.market_cap > 0.0);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let quote = AssetQuote::new("ETH", "Ethereum", 3412.56, 14567890123.0, 412567890123.0);
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"symbol\":\"ETH\""));

        let back: AssetQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
