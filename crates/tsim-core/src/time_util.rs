//! Nanosecond clocks.
//!
//! Tick timestamps and stream pacing use the monotonic clock so they never go
//! backwards; [`now_ns`] is wall-clock time for log correlation. On Linux both
//! read `clock_gettime` directly, elsewhere `SystemTime` / `Instant` are used.

#[cfg(target_os = "linux")]
#[inline]
fn clock_read(clock: libc::clockid_t) -> (u64, u64) {
    let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    // SAFETY: both clock ids used here are always valid; on failure the
    // zeroed timespec is returned unchanged.
    unsafe {
        libc::clock_gettime(clock, &mut ts);
    }
    (ts.tv_sec as u64, ts.tv_nsec as u64)
}

#[cfg(target_os = "linux")]
#[inline]
fn clock_realtime() -> (u64, u64) {
    clock_read(libc::CLOCK_REALTIME)
}

#[cfg(target_os = "linux")]
#[inline]
fn clock_monotonic() -> (u64, u64) {
    clock_read(libc::CLOCK_MONOTONIC)
}

#[cfg(not(target_os = "linux"))]
#[inline]
fn clock_realtime() -> (u64, u64) {
    use std::time::{SystemTime, UNIX_EPOCH};
    let d = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    (d.as_secs(), d.subsec_nanos() as u64)
}

#[cfg(not(target_os = "linux"))]
#[inline]
fn clock_monotonic() -> (u64, u64) {
    use std::{sync::LazyLock, time::Instant};
    static ORIGIN: LazyLock<Instant> = LazyLock::new(Instant::now);
    let d = ORIGIN.elapsed();
    (d.as_secs(), d.subsec_nanos() as u64)
}

/// Wall-clock time as **nanoseconds** since Unix epoch.
#[inline]
pub fn now_ns() -> u64 {
    let (sec, nsec) = clock_realtime();
    sec * 1_000_000_000 + nsec
}

/// Monotonic clock in **nanoseconds**. Only differences are meaningful.
#[inline]
pub fn monotonic_ns() -> u64 {
    let (sec, nsec) = clock_monotonic();
    sec * 1_000_000_000 + nsec
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn monotonic_never_goes_backwards() {
        let mut prev = monotonic_ns();
        for _ in 0..1_000 {
            let now = monotonic_ns();
            assert!(now >= prev);
            prev = now;
        }
    }

    #[test]
    fn wall_clock_agrees_with_seconds() {
        let ns = now_ns();
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        assert!((ns / 1_000_000_000).abs_diff(secs) <= 1);
    }
}
