//! Five-level synthetic order book around a tick.
//!
//! Level 0 is the tick's own quote. Each deeper level steps away from the
//! top by `uniform(0.01, 0.05) * level` in price and shows
//! `top_size * uniform(0.7, 1.3)` in size. Draw order per level: bid step,
//! bid size, then (after all bid levels) ask step, ask size.

use tsim_core::rng::XorShift64;
use tsim_core::types::{BookDepth, DEPTH_LEVELS, MarketTick};

use crate::generator::PRICE_FLOOR;

const STEP_MIN: f32 = 0.01;
const STEP_MAX: f32 = 0.05;
const SIZE_SCALE_MIN: f32 = 0.7;
const SIZE_SCALE_MAX: f32 = 1.3;

/// Build the book for `tick` using draws from `rng`.
pub fn synthesize(tick: &MarketTick, rng: &mut XorShift64) -> BookDepth {
    let mut depth = BookDepth { symbol_id: tick.symbol_id, ..Default::default() };

    // Deeper bids may not cross zero; a sub-floor top bid is its own floor.
    let bid_floor = PRICE_FLOOR.min(tick.bid_price);

    depth.bid_prices[0] = tick.bid_price;
    depth.bid_sizes[0] = tick.bid_size;
    for level in 1..DEPTH_LEVELS {
        let step = rng.uniform_f32(STEP_MIN, STEP_MAX) * level as f32;
        depth.bid_prices[level] = (tick.bid_price - step).max(bid_floor);
        depth.bid_sizes[level] = (tick.bid_size as f32 * rng.uniform_f32(SIZE_SCALE_MIN, SIZE_SCALE_MAX)) as u32;
    }

    depth.ask_prices[0] = tick.ask_price;
    depth.ask_sizes[0] = tick.ask_size;
    for level in 1..DEPTH_LEVELS {
        let step = rng.uniform_f32(STEP_MIN, STEP_MAX) * level as f32;
        depth.ask_prices[level] = tick.ask_price + step;
        depth.ask_sizes[level] = (tick.ask_size as f32 * rng.uniform_f32(SIZE_SCALE_MIN, SIZE_SCALE_MAX)) as u32;
    }

    depth.total_bid_liquidity = depth.bid_sizes.iter().map(|&s| s as u64).sum();
    depth.total_ask_liquidity = depth.ask_sizes.iter().map(|&s| s as u64).sum();
    depth
}
