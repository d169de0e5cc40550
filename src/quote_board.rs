//! The quote store: an ordered symbol → quote mapping with atomic batch
//! updates and read-only snapshots.

use crate::asset_quote::AssetQuote;
use crate::errors::BoardError;

use std::collections::HashMap;

/// Ordered mapping from symbol to quote.
///
/// The board is created once from a seed list and keeps its insertion
/// order for the lifetime of the engine, so the display order is stable
/// across ticks. Quotes are replaced in place by the tick handler; no
/// asset is ever added or removed at runtime.
#[derive(Debug)]
pub struct QuoteBoard {
    /// Quotes in seed order.
    quotes: Vec<AssetQuote>,
    /// Symbol -> position in `quotes`.
    index: HashMap<String, usize>,
}

impl QuoteBoard {
    /// Builds a board from a seed list.
    ///
    /// # Errors
    /// * [`BoardError::EmptySeed`] if `seed` contains no assets.
    /// * [`BoardError::DuplicateSymbol`] if two entries share a symbol.
    pub fn new(seed: Vec<AssetQuote>) -> Result<Self, BoardError> {
        if seed.is_empty() {
            return Err(BoardError::EmptySeed);
        }

        let mut index = HashMap::with_capacity(seed.len());
        for (position, quote) in seed.iter().enumerate() {
            if index.insert(quote.symbol.clone(), position).is_some() {
                return Err(BoardError::DuplicateSymbol(quote.symbol.clone()));
            }
        }

        Ok(Self { quotes: seed, index })
    }

    /// Number of tracked assets. Fixed after construction.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always `false` for a constructed board; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Looks up a single quote by symbol.
    pub fn get(&self, symbol: &str) -> Option<&AssetQuote> {
        self.index.get(symbol).map(|&position| &self.quotes[position])
    }

    /// Returns a read-only copy of all quotes in insertion order.
    pub fn snapshot(&self) -> Vec<AssetQuote> {
        self.quotes.clone()
    }

    /// Replaces each named quote in place and returns how many were applied.
    ///
    /// Updates naming a symbol absent from the board are dropped with a
    /// warning rather than treated as an error: one bad entry must not
    /// prevent the rest of the tick from landing. The caller is expected
    /// to hold the board exclusively for the duration of one tick, which
    /// makes the whole batch atomic with respect to concurrent snapshots.
    pub fn apply_updates(&mut self, updates: HashMap<String, AssetQuote>) -> usize {
        let mut applied = 0;
        for (symbol, quote) in updates {
            match self.index.get(&symbol) {
                Some(&position) => {
                    self.quotes[position] = quote;
                    applied += 1;
                }
                None => log::warn!("Dropping update for unknown symbol: {}", symbol),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<AssetQuote> {
        vec![
            AssetQuote::new("BTC", "Bitcoin", 64289.78, 32456789012.0, 1265789012345.0),
            AssetQuote::new("ETH", "Ethereum", 3412.56, 14567890123.0, 412567890123.0),
            AssetQuote::new("SOL", "Solana", 142.89, 3456789012.0, 64567890123.0),
        ]
    }

    #[test]
    fn test_rejects_empty_seed() {
        let result = QuoteBoard::new(Vec::new());
        assert!(matches!(result, Err(BoardError::EmptySeed)));
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        let mut assets = seed();
        assets.push(AssetQuote::new("BTC", "Bitcoin Again", 1.0, 1.0, 1.0));

        match QuoteBoard::new(assets) {
            Err(BoardError::DuplicateSymbol(symbol)) => assert_eq!(symbol, "BTC"),
            other => panic!("Expected DuplicateSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let board = QuoteBoard::new(seed()).unwrap();
        let symbols: Vec<String> = board.snapshot().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let board = QuoteBoard::new(seed()).unwrap();
        assert_eq!(board.snapshot(), board.snapshot());
    }

    #[test]
    fn test_apply_updates_replaces_in_place() {
        let mut board = QuoteBoard::new(seed()).unwrap();

        let mut updated = board.get("ETH").unwrap().clone();
        updated.price = 3500.0;
        updated.change_pct = 2.56;

        let mut updates = HashMap::new();
        updates.insert("ETH".to_string(), updated);

        assert_eq!(board.apply_updates(updates), 1);
        assert_eq!(board.get("ETH").unwrap().price, 3500.0);

        // Order unchanged after the update.
        let symbols: Vec<String> = board.snapshot().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    }

    #[test]
    fn test_unknown_symbol_update_is_dropped() {
        let mut board = QuoteBoard::new(seed()).unwrap();
        let before = board.snapshot();

        let mut updates = HashMap::new();
        updates.insert(
            "DOGE".to_string(),
            AssetQuote::new("DOGE", "Dogecoin", 0.1, 1.0, 1.0),
        );
        let mut updated_btc = board.get("BTC").unwrap().clone();
        updated_btc.price = 65000.0;
        updates.insert("BTC".to_string(), updated_btc);

        // The unknown entry is skipped, the known one still lands.
        assert_eq!(board.apply_updates(updates), 1);
        assert_eq!(board.get("BTC").unwrap().price, 65000.0);
        assert!(board.get("DOGE").is_none());
        assert_eq!(board.len(), before.len());
    }
}
