//! Weighted random-walk tick generator.
//!
//! [`TickGenerator`] owns the registry and the RNG. Each call picks a symbol
//! by sampling weight, random-walks its price with drift, synthesizes a
//! quote around it, and commits the new price back into the registry.
//!
//! # Per-tick draw order
//!
//! ```text
//! symbol weight → price change → spread bps → volume → venue → bid size → ask size
//! ```
//!
//! Keep this order stable: seeded runs and the tests depend on it.
//!
//! # Instrumentation
//!
//! Tick count and accumulated generation time live in [`GenerationCounters`]
//! behind an `Arc`, updated with relaxed atomic adds. A monitor thread can
//! hold a clone and read stats while the producer runs; reading never blocks
//! the producer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::{debug, info};
use tsim_core::config::GeneratorConfig;
use tsim_core::error::{Result, SimError};
use tsim_core::rng::XorShift64;
use tsim_core::time_util;
use tsim_core::types::{BookDepth, MarketTick, PacingMode, PerformanceStats, VenueInfo, default_symbols, default_venues};

use crate::depth;
use crate::registry::Registry;
use crate::stream::TickStream;

/// Prices never go below this.
pub const PRICE_FLOOR: f32 = 0.01;

/// Above this price the drawn spread is doubled.
pub const WIDE_SPREAD_PRICE: f32 = 500.0;

/// Interval used when the target frequency is 0.
pub const DEFAULT_INTERVAL_NS: u64 = 1_000_000;

const SPREAD_BPS_MIN: f32 = 0.5;
const SPREAD_BPS_MAX: f32 = 3.0;
const MIN_DISPLAY_SIZE: u32 = 100;
const MAX_DISPLAY_SIZE: u32 = 10_000;

// ---------------------------------------------------------------------------
// GenerationCounters
// ---------------------------------------------------------------------------

/// Relaxed atomic tick and timing counters.
#[derive(Debug, Default)]
pub struct GenerationCounters {
    total_ticks: AtomicU64,
    generation_time_ns: AtomicU64,
}

impl GenerationCounters {
    #[inline]
    fn record(&self, elapsed_ns: u64) {
        self.total_ticks.fetch_add(1, Ordering::Relaxed);
        self.generation_time_ns.fetch_add(elapsed_ns, Ordering::Relaxed);
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.total_ticks.store(0, Ordering::Relaxed);
        self.generation_time_ns.store(0, Ordering::Relaxed);
    }

    /// Snapshot against the given target interval.
    pub fn snapshot(&self, target_interval_ns: u64) -> PerformanceStats {
        let total_ticks = self.total_ticks.load(Ordering::Relaxed);
        let total_time_ns = self.generation_time_ns.load(Ordering::Relaxed);

        let avg_generation_time_ns = if total_ticks > 0 { total_time_ns / total_ticks } else { 0 };
        let ticks_per_second = if total_time_ns > 0 {
            (total_ticks as u128 * 1_000_000_000 / total_time_ns as u128) as u64
        } else {
            0
        };
        let cpu_efficiency_percent = if target_interval_ns > 0 {
            avg_generation_time_ns as f64 / target_interval_ns as f64 * 100.0
        } else {
            0.0
        };

        PerformanceStats { total_ticks, avg_generation_time_ns, ticks_per_second, cpu_efficiency_percent }
    }
}

// ---------------------------------------------------------------------------
// TickGenerator
// ---------------------------------------------------------------------------

/// Simulated tick source for a fixed symbol/venue universe.
///
/// Must be driven by one producer at a time (`&mut self`); independent
/// generators can run on separate threads.
pub struct TickGenerator {
    registry: Registry,
    rng: XorShift64,
    counters: Arc<GenerationCounters>,
    target_interval_ns: u64,
}

impl TickGenerator {
    /// Clock-seeded generator over the default universe.
    pub fn new(ticks_per_second: u32) -> Self {
        Self::with_rng(ticks_per_second, XorShift64::from_clock())
    }

    /// Reproducible generator over the default universe.
    pub fn with_seed(ticks_per_second: u32, seed: u64) -> Self {
        Self::with_rng(ticks_per_second, XorShift64::new(seed))
    }

    /// Build from the `generator` config section.
    pub fn from_config(cfg: &GeneratorConfig) -> Self {
        let rng = cfg.seed.map(XorShift64::new).unwrap_or_else(XorShift64::from_clock);
        Self::build(cfg.ticks_per_second, rng, &cfg.effective_symbols(), &cfg.effective_venues())
    }

    fn with_rng(ticks_per_second: u32, rng: XorShift64) -> Self {
        Self::build(ticks_per_second, rng, &default_symbols(), &default_venues())
    }

    fn build(ticks_per_second: u32, rng: XorShift64, symbols: &[String], venues: &[VenueInfo]) -> Self {
        let mut generator = Self {
            registry: Registry::new(),
            rng,
            counters: Arc::new(GenerationCounters::default()),
            target_interval_ns: DEFAULT_INTERVAL_NS,
        };
        info!("tick generator seeded with {:#018x}", generator.rng.state());
        generator.set_target_frequency(ticks_per_second);
        generator.initialize_symbols(symbols, venues);
        generator
    }

    /// Replace the symbol/venue universe. See [`Registry::initialize`].
    pub fn initialize_symbols<S: AsRef<str>>(&mut self, symbol_names: &[S], venue_configs: &[VenueInfo]) {
        self.registry.initialize(symbol_names, venue_configs, &mut self.rng);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// One tick stamped with the current monotonic time.
    pub fn generate_tick(&mut self) -> Result<MarketTick> {
        self.generate_tick_at(time_util::monotonic_ns())
    }

    /// One tick stamped with `timestamp_ns` (virtual clocks, replays).
    pub fn generate_tick_at(&mut self, timestamp_ns: u64) -> Result<MarketTick> {
        let start = Instant::now();

        let num_symbols = self.registry.num_symbols();
        let num_venues = self.registry.num_venues();
        let total_weight = self.registry.total_weight();
        if num_symbols == 0 || num_venues == 0 || total_weight == 0 {
            return Err(SimError::EmptyUniverse { symbols: num_symbols, venues: num_venues });
        }

        let draw = self.rng.uniform_u32(0, total_weight - 1);
        let selected = self.registry.select(draw);

        let (volatility, trend, current_price, avg_volume) = {
            let s = &self.registry.symbols()[selected];
            (s.volatility, s.price_trend, s.current_price, s.avg_volume)
        };

        let mut price_change = self.rng.uniform_f32(-volatility * 0.01, volatility * 0.01);
        price_change += trend * 0.001;
        let new_price = (current_price * (1.0 + price_change)).max(PRICE_FLOOR);

        let mut spread_bps = self.rng.uniform_f32(SPREAD_BPS_MIN, SPREAD_BPS_MAX);
        if new_price > WIDE_SPREAD_PRICE {
            spread_bps *= 2.0;
        }
        let spread_dollars = spread_bps / 10_000.0 * new_price;
        let bid_price = new_price - spread_dollars * 0.5;
        let ask_price = new_price + spread_dollars * 0.5;

        let volume = self.rng.uniform_u32((avg_volume as f32 * 0.1) as u32, (avg_volume as f32 * 2.0) as u32);
        let venue_id = self.rng.uniform_u32(0, num_venues as u32 - 1) as u8;

        if let Some(s) = self.registry.symbol_mut(selected) {
            s.current_price = new_price;
            s.last_update_ns = timestamp_ns;
        }

        let tick = MarketTick {
            timestamp_ns,
            symbol_id: selected as u32,
            bid_price,
            ask_price,
            bid_size: self.rng.uniform_u32(MIN_DISPLAY_SIZE, MAX_DISPLAY_SIZE),
            ask_size: self.rng.uniform_u32(MIN_DISPLAY_SIZE, MAX_DISPLAY_SIZE),
            last_price: new_price,
            volume,
            venue_id,
            spread_bps,
        };

        self.counters.record(start.elapsed().as_nanos() as u64);
        Ok(tick)
    }

    /// Fill `out` with ticks on a synthetic clock.
    ///
    /// The first tick keeps its wall-clock stamp; each later tick is stamped
    /// `previous + interval + jitter`, with jitter in `[0, interval / 10]`.
    pub fn generate_tick_batch(&mut self, out: &mut [MarketTick]) -> Result<()> {
        for i in 0..out.len() {
            out[i] = self.generate_tick()?;
            if i > 0 {
                let jitter = self.rng.uniform_u64(0, self.target_interval_ns / 10);
                out[i].timestamp_ns = out[i - 1].timestamp_ns + self.target_interval_ns + jitter;
            }
        }
        Ok(())
    }

    /// Five-level synthetic book around `tick`, drawn from this generator's RNG.
    pub fn generate_depth(&mut self, tick: &MarketTick) -> BookDepth {
        depth::synthesize(tick, &mut self.rng)
    }

    /// Pull-based paced stream over this generator.
    pub fn create_stream(&mut self, mode: PacingMode) -> TickStream<'_> {
        TickStream::new(self, mode)
    }

    pub fn performance_stats(&self) -> PerformanceStats {
        self.counters.snapshot(self.target_interval_ns)
    }

    /// Shared handle to the counters for monitoring from another thread.
    pub fn counters(&self) -> Arc<GenerationCounters> {
        Arc::clone(&self.counters)
    }

    pub fn reset_performance_counters(&self) {
        self.counters.reset();
        debug!("generator counters reset");
    }

    /// Target interval becomes `1e9 / ticks_per_second` ns (1 ms for 0).
    pub fn set_target_frequency(&mut self, ticks_per_second: u32) {
        self.target_interval_ns = if ticks_per_second > 0 {
            1_000_000_000 / ticks_per_second as u64
        } else {
            DEFAULT_INTERVAL_NS
        };
    }

    pub fn target_interval_ns(&self) -> u64 {
        self.target_interval_ns
    }

    pub fn update_symbol_volatility(&mut self, symbol_idx: usize, new_volatility: f32) -> Result<()> {
        let count = self.registry.num_symbols();
        let s = self
            .registry
            .symbol_mut(symbol_idx)
            .ok_or(SimError::SymbolIndex { index: symbol_idx, count })?;
        s.volatility = new_volatility;
        Ok(())
    }

    pub fn update_symbol_price(&mut self, symbol_idx: usize, new_price: f32) -> Result<()> {
        let count = self.registry.num_symbols();
        let s = self
            .registry
            .symbol_mut(symbol_idx)
            .ok_or(SimError::SymbolIndex { index: symbol_idx, count })?;
        s.current_price = new_price;
        Ok(())
    }
}
