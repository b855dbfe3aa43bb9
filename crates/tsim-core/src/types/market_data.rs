//! Market data structures produced by the tick generator.
//!
//! [`MarketTick`] is `#[repr(C)]` and `Copy` so the same value can be handed
//! across the flat-call boundary, copied into caller-owned buffers, and sent
//! through channels without conversion. Field order and widths match the host
//! bindings (naturally aligned, no packing).
//!
//! # Timestamp convention
//!
//! `timestamp_ns` is **monotonic nanoseconds**. Only differences between ticks
//! are meaningful; it is not a wall-clock time.

use serde::Serialize;

/// Number of levels per side in a [`BookDepth`] snapshot.
pub const DEPTH_LEVELS: usize = 5;

// ---------------------------------------------------------------------------
// MarketTick
// ---------------------------------------------------------------------------

/// One simulated quote + trade event for a symbol at a venue.
///
/// Invariants for generator output: `ask_price > bid_price > 0`,
/// `spread_bps >= 0`, `symbol_id < num_symbols`, `venue_id < num_venues`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[repr(C)]
pub struct MarketTick {
    pub timestamp_ns: u64,
    pub symbol_id: u32,
    pub bid_price: f32,
    pub ask_price: f32,
    pub bid_size: u32,
    pub ask_size: u32,
    pub last_price: f32,
    pub volume: u32,
    pub venue_id: u8,
    pub spread_bps: f32,
}

impl MarketTick {
    #[inline]
    pub fn mid_price(&self) -> f32 {
        (self.bid_price + self.ask_price) * 0.5
    }

    /// Absolute spread in price units.
    #[inline]
    pub fn spread(&self) -> f32 {
        self.ask_price - self.bid_price
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.bid_price > 0.0 && self.ask_price > self.bid_price
    }
}

impl std::fmt::Display for MarketTick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tick(sym={} venue={} bid={:.4}x{} ask={:.4}x{} last={:.4} vol={} spread={:.2}bps ts={})",
            self.symbol_id,
            self.venue_id,
            self.bid_price,
            self.bid_size,
            self.ask_price,
            self.ask_size,
            self.last_price,
            self.volume,
            self.spread_bps,
            self.timestamp_ns,
        )
    }
}

// ---------------------------------------------------------------------------
// BookDepth (5-level synthetic book)
// ---------------------------------------------------------------------------

/// Five-level synthetic book around a tick's top of book.
///
/// `bid_prices[0]` / `ask_prices[0]` are the tick's own quote; deeper bid
/// levels are lower, deeper ask levels higher.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BookDepth {
    pub symbol_id: u32,
    pub bid_prices: [f32; DEPTH_LEVELS],
    pub bid_sizes: [u32; DEPTH_LEVELS],
    pub ask_prices: [f32; DEPTH_LEVELS],
    pub ask_sizes: [u32; DEPTH_LEVELS],
    pub total_bid_liquidity: u64,
    pub total_ask_liquidity: u64,
}

impl std::fmt::Display for BookDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Depth(sym={} bid[0]={:.4} ask[0]={:.4} liq={}/{})",
            self.symbol_id,
            self.bid_prices[0],
            self.ask_prices[0],
            self.total_bid_liquidity,
            self.total_ask_liquidity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(bid: f32, ask: f32) -> MarketTick {
        MarketTick { bid_price: bid, ask_price: ask, last_price: (bid + ask) / 2.0, ..Default::default() }
    }

    #[test]
    fn derived_prices() {
        let t = tick(99.5, 100.5);
        assert_eq!(t.mid_price(), 100.0);
        assert_eq!(t.spread(), 1.0);
        assert!(t.is_valid());
    }

    #[test]
    fn crossed_or_zero_quotes_are_invalid() {
        assert!(!tick(0.0, 1.0).is_valid());
        assert!(!tick(10.0, 10.0).is_valid());
        assert!(!tick(10.0, 9.0).is_valid());
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_string(&tick(1.0, 2.0)).unwrap();
        assert!(json.contains("\"bid_price\":1.0"));
        assert!(json.contains("\"venue_id\":0"));
    }
}
