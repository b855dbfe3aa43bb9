//! Self-instrumentation snapshots for the generator and processor.
//!
//! Both are plain `#[repr(C)]` values computed on demand from atomic
//! counters; holding one does not pin or lock anything.

use serde::Serialize;

/// Generator throughput snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[repr(C)]
pub struct PerformanceStats {
    pub total_ticks: u64,
    pub avg_generation_time_ns: u64,
    pub ticks_per_second: u64,
    /// Average generation time as a percentage of the target interval.
    pub cpu_efficiency_percent: f64,
}

impl std::fmt::Display for PerformanceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ticks={} avg={}ns rate={}/s budget_used={:.3}%",
            self.total_ticks, self.avg_generation_time_ns, self.ticks_per_second, self.cpu_efficiency_percent,
        )
    }
}

/// Processor throughput snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[repr(C)]
pub struct ProcessorStats {
    pub ticks_per_second: u64,
    pub avg_processing_time_ns: u64,
    /// Percentage, capped at 100.
    pub throughput_efficiency: f64,
}

impl std::fmt::Display for ProcessorStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rate={}/s avg={}ns efficiency={:.1}%",
            self.ticks_per_second, self.avg_processing_time_ns, self.throughput_efficiency,
        )
    }
}
