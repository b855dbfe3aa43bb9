//! Feature worker: the consumer half of the producer → features pipeline.
//!
//! ```text
//! TickStream ──► crossbeam channel ──► run_feature_loop()
//!                                       ├─ SymbolHistory (rolling, per symbol)
//!                                       ├─ MarketDataProcessor::process_tick
//!                                       ├─ calculate_risk_metrics
//!                                       └─ optional sink callback
//! ```
//!
//! Each tick is scored against the history that precedes it and only then
//! appended, so a tick never sees itself. The loop runs on the calling
//! thread until every sender is dropped.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Receiver;
use tracing::info;
use tsim_core::config::ProcessorConfig;
use tsim_core::latency::{LatencyCollector, LatencyStats};
use tsim_core::types::{MarketTick, MlFeatures, RiskMetrics};

use crate::processor::MarketDataProcessor;
use crate::registry::MAX_SYMBOLS;

/// Per-tick callback: tick, its features, and the resulting risk.
pub type FeatureSink = Box<dyn FnMut(&MarketTick, &MlFeatures, &RiskMetrics) + Send>;

/// Rolling per-symbol tick history, oldest first.
pub struct SymbolHistory {
    buffers: Vec<VecDeque<MarketTick>>,
    capacity: usize,
}

impl SymbolHistory {
    /// Keep at most `capacity` ticks per symbol (minimum 1).
    ///
    /// Buffers grow as ticks arrive; nothing is reserved up front.
    pub fn new(capacity: usize) -> Self {
        Self { buffers: (0..MAX_SYMBOLS).map(|_| VecDeque::new()).collect(), capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of ticks held for `symbol_id`.
    pub fn len(&self, symbol_id: u32) -> usize {
        self.buffers.get(symbol_id as usize).map_or(0, VecDeque::len)
    }

    /// Append a tick, evicting the oldest once full. Unknown ids are ignored.
    pub fn push(&mut self, tick: MarketTick) {
        if let Some(buf) = self.buffers.get_mut(tick.symbol_id as usize) {
            if buf.len() == self.capacity {
                buf.pop_front();
            }
            buf.push_back(tick);
        }
    }

    /// Contiguous view of a symbol's history.
    pub fn view(&mut self, symbol_id: u32) -> &[MarketTick] {
        match self.buffers.get_mut(symbol_id as usize) {
            Some(buf) => &*buf.make_contiguous(),
            None => &[],
        }
    }
}

/// What a feature loop did before its channel closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineSummary {
    pub ticks: u64,
    pub risk_breaches: u64,
    /// Per-tick process + risk time.
    pub latency: Option<LatencyStats>,
}

/// Run the feature loop on the calling thread.
///
/// Reads ticks from `rx`, scores each against its symbol's history, computes
/// risk for `cfg.position_size`, and hands all three to `sink` if given.
/// If `cfg.cpu_affinity` is set the thread is pinned before the hot loop.
pub fn run_feature_loop(
    label: &str,
    rx: Receiver<MarketTick>,
    processor: Arc<MarketDataProcessor>,
    cfg: &ProcessorConfig,
    mut sink: Option<FeatureSink>,
) -> PipelineSummary {
    tsim_core::cpu_affinity::maybe_bind(cfg.cpu_affinity);
    let mut history = SymbolHistory::new(cfg.history_len);
    let mut latency = LatencyCollector::new();
    let mut summary = PipelineSummary::default();

    info!("[{label}] feature loop started (history_len={})", history.capacity());

    while let Ok(tick) = rx.recv() {
        let start = Instant::now();
        let features = processor.process_tick(&tick, history.view(tick.symbol_id));
        let risk = MarketDataProcessor::calculate_risk_metrics(&features, cfg.position_size);
        latency.record(start.elapsed().as_nanos() as u64);

        history.push(tick);
        summary.ticks += 1;
        if risk.risk_limit_exceeded {
            summary.risk_breaches += 1;
        }
        if let Some(ref mut f) = sink {
            f(&tick, &features, &risk);
        }

        if cfg.stats_interval_ticks > 0 && summary.ticks % cfg.stats_interval_ticks == 0 {
            info!(
                "[{label}] {} ticks, {} risk breaches, {}",
                summary.ticks,
                summary.risk_breaches,
                processor.processor_stats()
            );
        }
    }

    summary.latency = latency.stats();
    info!("[{label}] feature loop exited after {} ticks", summary.ticks);
    summary
}
