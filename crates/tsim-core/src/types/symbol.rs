//! Default symbol universe and its per-symbol seed tables.
//!
//! The three tables are index-aligned: `BASE_PRICES[i]` and
//! `TICK_MULTIPLIERS[i]` belong to `DEFAULT_SYMBOLS[i]`. Lookups are by
//! registration index, not by name, so a custom symbol list still picks up
//! the table entry at its position; positions past the end of a table fall
//! back to [`DEFAULT_BASE_PRICE`] / [`DEFAULT_TICK_MULTIPLIER`].

/// Large-cap US equities and ETFs.
pub const DEFAULT_SYMBOLS: [&str; 27] = [
    "AAPL", "MSFT", "GOOGL", "TSLA", "NVDA", "META", "AMZN", "NFLX", // tech
    "JPM", "BAC", "WFC", "GS", "C", "JNJ", "PFE", "UNH", "ABBV", // financials, healthcare
    "PG", "KO", "XOM", "CVX", "DIS", "SPY", "QQQ", "IWM", "GLD", "TLT", // consumer, energy, ETFs
];

/// Starting prices.
pub const BASE_PRICES: [f32; 27] = [
    227.21, 521.75, 201.00, 339.18, 182.09, 765.52, 221.37, 1218.37, //
    289.71, 46.19, 77.61, 719.33, 92.31, 174.04, 24.61, 252.41, 198.64, //
    155.03, 70.79, 105.88, 153.54, 112.58, 635.82, 572.75, 220.28, 308.60, 87.41,
];

/// Relative sampling weights; SPY and QQQ are the busiest names.
pub const TICK_MULTIPLIERS: [u32; 27] = [
    5, 5, 4, 6, 6, 5, 4, 4, //
    3, 3, 3, 3, 3, 2, 2, 3, 2, //
    2, 2, 3, 3, 2, 8, 7, 6, 2, 1,
];

pub const DEFAULT_BASE_PRICE: f32 = 100.0;
pub const DEFAULT_TICK_MULTIPLIER: u32 = 3;

/// Seed price for the symbol registered at `index`.
#[inline]
pub fn base_price(index: usize) -> f32 {
    BASE_PRICES.get(index).copied().unwrap_or(DEFAULT_BASE_PRICE)
}

/// Sampling weight for the symbol registered at `index`.
#[inline]
pub fn tick_multiplier(index: usize) -> u32 {
    TICK_MULTIPLIERS.get(index).copied().unwrap_or(DEFAULT_TICK_MULTIPLIER)
}

/// The default universe as owned strings.
pub fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}
