//! Paced, pull-based tick sequence over a [`TickGenerator`].
//!
//! ```text
//! Created ──next()──► Running ──stop() / StopHandle / generator error──► Stopped
//! ```
//!
//! `Stopped` is terminal. In [`PacingMode::RealTime`] each `next()` sleeps on
//! the caller thread until the tick is due; in [`PacingMode::Virtual`] the
//! due time is a virtual clock that stamps the tick and advances by the
//! target interval without sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};
use tsim_core::time_util;
use tsim_core::types::{MarketTick, PacingMode, StreamState};

use crate::generator::TickGenerator;

/// Cross-thread stop request for a [`TickStream`].
///
/// Checked at the top of every `next()`; never interrupts a tick in flight.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Iterator of paced ticks. Borrows the generator for its lifetime.
pub struct TickStream<'a> {
    generator: &'a mut TickGenerator,
    mode: PacingMode,
    next_due_ns: u64,
    state: StreamState,
    stop: StopHandle,
    emitted: u64,
}

impl<'a> TickStream<'a> {
    pub fn new(generator: &'a mut TickGenerator, mode: PacingMode) -> Self {
        Self { generator, mode, next_due_ns: 0, state: StreamState::Created, stop: StopHandle::default(), emitted: 0 }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn mode(&self) -> PacingMode {
        self.mode
    }

    /// Ticks handed out so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// A handle another thread can use to stop this stream.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Obey an existing handle instead of a fresh one, for when the
    /// controller must exist before the stream.
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop(&mut self) {
        if self.state != StreamState::Stopped {
            self.state = StreamState::Stopped;
            info!("tick stream stopped after {} ticks", self.emitted);
        }
    }

    /// Produce the next tick, or `None` once stopped.
    pub fn next_tick(&mut self) -> Option<MarketTick> {
        if self.stop.is_stopped() {
            self.stop();
        }
        match self.state {
            StreamState::Stopped => return None,
            StreamState::Created => {
                self.state = StreamState::Running;
                self.next_due_ns = time_util::monotonic_ns();
                info!(
                    "tick stream running: mode={} interval={}ns",
                    self.mode,
                    self.generator.target_interval_ns()
                );
            }
            StreamState::Running => {}
        }

        let result = match self.mode {
            PacingMode::RealTime => {
                let now = time_util::monotonic_ns();
                if now < self.next_due_ns {
                    std::thread::sleep(Duration::from_nanos(self.next_due_ns - now));
                }
                self.generator.generate_tick()
            }
            PacingMode::Virtual => self.generator.generate_tick_at(self.next_due_ns),
        };

        match result {
            Ok(tick) => {
                self.next_due_ns += self.generator.target_interval_ns();
                self.emitted += 1;
                Some(tick)
            }
            Err(e) => {
                warn!("tick stream stopping on generator error: {e}");
                self.stop();
                None
            }
        }
    }
}

impl Iterator for TickStream<'_> {
    type Item = MarketTick;

    fn next(&mut self) -> Option<MarketTick> {
        self.next_tick()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn lifecycle_created_running_stopped() {
        let mut g = TickGenerator::with_seed(1_000, 1);
        let mut stream = g.create_stream(PacingMode::Virtual);
        assert_eq!(stream.state(), StreamState::Created);

        assert!(stream.next().is_some());
        assert_eq!(stream.state(), StreamState::Running);

        stream.stop();
        assert_eq!(stream.state(), StreamState::Stopped);
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        assert_eq!(stream.emitted(), 1);
    }

    #[test]
    fn virtual_clock_spaces_ticks_exactly() {
        let mut g = TickGenerator::with_seed(2_000, 2);
        let interval = g.target_interval_ns();
        let ticks: Vec<MarketTick> = g.create_stream(PacingMode::Virtual).take(50).collect();
        assert_eq!(ticks.len(), 50);
        for w in ticks.windows(2) {
            assert_eq!(w[1].timestamp_ns - w[0].timestamp_ns, interval);
        }
        assert_eq!(g.performance_stats().total_ticks, 50);
    }

    #[test]
    fn real_time_pacing_waits_for_due_time() {
        // 200 ticks/s -> 5ms interval; 5 ticks need at least 4 intervals.
        let mut g = TickGenerator::with_seed(200, 3);
        let start = Instant::now();
        let ticks: Vec<MarketTick> = g.create_stream(PacingMode::RealTime).take(5).collect();
        assert_eq!(ticks.len(), 5);
        assert!(start.elapsed() >= Duration::from_millis(20));
        for w in ticks.windows(2) {
            assert!(w[1].timestamp_ns > w[0].timestamp_ns);
        }
    }

    #[test]
    fn stop_handle_takes_effect_before_next_tick() {
        let mut g = TickGenerator::with_seed(1_000, 4);
        let mut stream = g.create_stream(PacingMode::Virtual);
        let handle = stream.stop_handle();
        assert!(stream.next().is_some());
        handle.stop();
        assert!(stream.next().is_none());
        assert_eq!(stream.state(), StreamState::Stopped);
    }

    #[test]
    fn external_handle_stopped_before_start() {
        let handle = StopHandle::default();
        handle.stop();
        let mut g = TickGenerator::with_seed(1_000, 7);
        let mut stream = g.create_stream(PacingMode::Virtual).with_stop_handle(handle.clone());
        assert!(stream.next().is_none());
        assert_eq!(stream.state(), StreamState::Stopped);
        assert!(stream.stop_handle().is_stopped());
    }

    #[test]
    fn stop_before_first_tick_is_terminal() {
        let mut g = TickGenerator::with_seed(1_000, 5);
        let mut stream = g.create_stream(PacingMode::Virtual);
        stream.stop();
        assert!(stream.next().is_none());
        assert_eq!(stream.emitted(), 0);
    }

    #[test]
    fn empty_universe_stops_stream() {
        let mut g = TickGenerator::with_seed(1_000, 6);
        g.initialize_symbols(&["AAPL"], &[]);
        let mut stream = g.create_stream(PacingMode::Virtual);
        assert!(stream.next().is_none());
        assert_eq!(stream.state(), StreamState::Stopped);
    }
}
