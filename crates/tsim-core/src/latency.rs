//! Histogram-based latency collector for per-tick pipeline timings.
//!
//! The feature worker and the benchmark loop record how long each tick
//! spends in generate/process. After a run, statistics are computed on
//! demand: min, max, average, and percentiles (p50, p90, p99).
//!
//! The histogram uses fixed 50ns bins up to 200µs (4000 bins). Slower
//! samples are clamped to the last bin; `max` still reports the true value.

/// Width of each histogram bin in nanoseconds.
const BIN_WIDTH_NS: u64 = 50;

/// Number of histogram bins (covers 0–200µs).
const NUM_BINS: usize = 4000;

/// Computed latency statistics.
#[derive(Debug, Clone, Copy)]
pub struct LatencyStats {
    pub count: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub avg_ns: f64,
    pub p50_ns: u64,
    pub p90_ns: u64,
    pub p99_ns: u64,
}

impl std::fmt::Display for LatencyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} min={}ns max={}ns avg={:.1}ns p50={}ns p90={}ns p99={}ns",
            self.count, self.min_ns, self.max_ns, self.avg_ns, self.p50_ns, self.p90_ns, self.p99_ns,
        )
    }
}

/// A histogram-based latency collector.
///
/// Not thread-safe; each worker owns its own instance.
pub struct LatencyCollector {
    bins: Vec<u64>,
    count: u64,
    sum: u64,
    min: u64,
    max: u64,
}

impl LatencyCollector {
    pub fn new() -> Self {
        Self { bins: vec![0u64; NUM_BINS], count: 0, sum: 0, min: u64::MAX, max: 0 }
    }

    /// Record a sample in nanoseconds.
    #[inline]
    pub fn record(&mut self, latency_ns: u64) {
        self.count += 1;
        self.sum = self.sum.saturating_add(latency_ns);
        self.min = self.min.min(latency_ns);
        self.max = self.max.max(latency_ns);

        let bin = ((latency_ns / BIN_WIDTH_NS) as usize).min(NUM_BINS - 1);
        self.bins[bin] += 1;
    }

    /// Summary statistics, or `None` before the first sample.
    pub fn stats(&self) -> Option<LatencyStats> {
        if self.count == 0 {
            return None;
        }

        Some(LatencyStats {
            count: self.count,
            min_ns: self.min,
            max_ns: self.max,
            avg_ns: self.sum as f64 / self.count as f64,
            p50_ns: self.percentile(0.50),
            p90_ns: self.percentile(0.90),
            p99_ns: self.percentile(0.99),
        })
    }

    /// Lower edge of the bin holding the given percentile (0.0–1.0).
    fn percentile(&self, pct: f64) -> u64 {
        let target = (self.count as f64 * pct).ceil() as u64;
        let mut cumulative = 0u64;
        for (i, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            if cumulative >= target {
                return (i as u64) * BIN_WIDTH_NS;
            }
        }
        self.max
    }
}

impl Default for LatencyCollector {
    fn default() -> Self {
        Self::new()
    }
}
