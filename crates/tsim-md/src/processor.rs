//! Feature extraction and pre-trade risk.
//!
//! [`MarketDataProcessor`] is stateless apart from its relaxed atomic
//! counters: every feature vector is a pure function of the tick and the
//! caller's history slice, so one processor can be shared across threads
//! behind an `Arc`.
//!
//! # History window
//!
//! History is ordered oldest → newest. Only the last [`RECENT_WINDOW`]
//! entries feed the mean/volatility features. Momentum compares against
//! the entry [`MOMENTUM_LOOKBACK`] back from the end of the full slice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tsim_core::types::{MarketTick, MlFeatures, ProcessorStats, RiskMetrics};

/// Entries of history used for mean/volatility.
pub const RECENT_WINDOW: usize = 10;

/// Momentum lookback, in history entries.
pub const MOMENTUM_LOOKBACK: usize = 5;

/// `volatility_5min` reported when there is not enough history.
pub const DEFAULT_VOLATILITY: f32 = 0.02;

/// Counted per processed tick, one per computed feature.
pub const FEATURES_PER_TICK: u64 = MlFeatures::NUM_FEATURES as u64;

// Risk limits. Fixed simulation constants.
pub const MAX_POSITION_RISK: f32 = 10_000.0;
pub const MAX_ABS_PRICE_CHANGE: f32 = 0.05;
pub const MAX_VOLATILITY: f32 = 0.10;

/// Relaxed atomic processing counters.
#[derive(Debug, Default)]
struct ProcessingCounters {
    ticks_processed: AtomicU64,
    processing_time_ns: AtomicU64,
    feature_calculations: AtomicU64,
}

/// Tick → feature vector → risk.
#[derive(Debug, Default)]
pub struct MarketDataProcessor {
    stats: ProcessingCounters,
}

impl MarketDataProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Features for `tick` given `history` (oldest first, may be empty).
    pub fn process_tick(&self, tick: &MarketTick, history: &[MarketTick]) -> MlFeatures {
        let start = Instant::now();

        let mut features = MlFeatures {
            spread_bps: tick.spread_bps,
            liquidity_score: ((tick.bid_size as u64 + tick.ask_size as u64 + 1) as f32).ln(),
            venue_preference: tick.venue_id as f32 / 10.0,
            timestamp_ns: tick.timestamp_ns,
            ..Default::default()
        };

        let history_size = history.len();
        if history_size > 1 {
            let recent = &history[history_size - history_size.min(RECENT_WINDOW)..];
            let n = recent.len() as f32;

            let (price_sum, volume_sum) =
                recent.iter().fold((0.0f32, 0.0f32), |(p, v), t| (p + t.last_price, v + t.volume as f32));
            let avg_price = price_sum / n;
            let avg_volume = volume_sum / n;

            features.price_change = (tick.last_price - avg_price) / avg_price;
            features.volume_ratio = tick.volume as f32 / avg_volume.max(1.0);

            let variance_sum: f32 = recent
                .iter()
                .map(|t| {
                    let diff = t.last_price - avg_price;
                    diff * diff
                })
                .sum();
            features.volatility_5min = (variance_sum / n).sqrt();

            if recent.len() >= MOMENTUM_LOOKBACK {
                let old_price = history[history_size - MOMENTUM_LOOKBACK].last_price;
                features.momentum_1min = (tick.last_price - old_price) / old_price;
            }
        } else {
            features.price_change = 0.0;
            features.volume_ratio = 1.0;
            features.volatility_5min = DEFAULT_VOLATILITY;
            features.momentum_1min = 0.0;
        }

        let elapsed = start.elapsed().as_nanos() as u64;
        self.stats.ticks_processed.fetch_add(1, Ordering::Relaxed);
        self.stats.processing_time_ns.fetch_add(elapsed, Ordering::Relaxed);
        self.stats.feature_calculations.fetch_add(FEATURES_PER_TICK, Ordering::Relaxed);

        features
    }

    /// Features for each of `ticks` against the same `history`.
    ///
    /// Processes `min(ticks.len(), out.len())` ticks and returns that count.
    pub fn process_tick_batch(&self, ticks: &[MarketTick], history: &[MarketTick], out: &mut [MlFeatures]) -> usize {
        let n = ticks.len().min(out.len());
        for (tick, slot) in ticks.iter().zip(out.iter_mut()) {
            *slot = self.process_tick(tick, history);
        }
        n
    }

    /// Risk for a signed `position_size` against `features`.
    pub fn calculate_risk_metrics(features: &MlFeatures, position_size: f32) -> RiskMetrics {
        let size = position_size.abs();
        let position_risk = size * features.volatility_5min * 1000.0;
        let market_impact_estimate = size * features.spread_bps * 0.1;
        let execution_cost_estimate = size * (features.spread_bps * 0.5 + 0.5);

        let risk_limit_exceeded = position_risk > MAX_POSITION_RISK
            || features.price_change.abs() > MAX_ABS_PRICE_CHANGE
            || features.volatility_5min > MAX_VOLATILITY;

        RiskMetrics { position_risk, market_impact_estimate, execution_cost_estimate, risk_limit_exceeded }
    }

    pub fn processor_stats(&self) -> ProcessorStats {
        let ticks = self.stats.ticks_processed.load(Ordering::Relaxed);
        let time_ns = self.stats.processing_time_ns.load(Ordering::Relaxed);

        let ticks_per_second = if time_ns > 0 { (ticks as u128 * 1_000_000_000 / time_ns as u128) as u64 } else { 0 };
        let avg_processing_time_ns = if ticks > 0 { time_ns / ticks } else { 0 };
        let throughput_efficiency = if avg_processing_time_ns > 0 {
            (1000.0 / avg_processing_time_ns as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        ProcessorStats { ticks_per_second, avg_processing_time_ns, throughput_efficiency }
    }

    pub fn ticks_processed(&self) -> u64 {
        self.stats.ticks_processed.load(Ordering::Relaxed)
    }

    pub fn feature_calculations(&self) -> u64 {
        self.stats.feature_calculations.load(Ordering::Relaxed)
    }

    pub fn reset_stats(&self) {
        self.stats.ticks_processed.store(0, Ordering::Relaxed);
        self.stats.processing_time_ns.store(0, Ordering::Relaxed);
        self.stats.feature_calculations.store(0, Ordering::Relaxed);
    }
}
