//! Seeded xorshift64 bit generator.
//!
//! Shifts 13/7/17. A given seed always replays the same tick sequence.
//! Range conversions:
//!
//! - floats take the low 24 bits of the state, normalized to `[0, 1)`
//! - integers use `min + x % (max - min + 1)`, with the small modulo bias
//!   that implies
//!
//! Not suitable for anything cryptographic.

use crate::time_util;

/// Replacement for a zero seed. Zero is a fixed point of xorshift.
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// 2^24, the float normalization divisor.
const F32_SCALE: f32 = 16_777_216.0;

/// xorshift64 state. `Clone` so tests can fork a stream and replay it.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: if seed == 0 { FALLBACK_SEED } else { seed } }
    }

    /// Seed from the wall and monotonic clocks.
    pub fn from_clock() -> Self {
        Self::new(time_util::now_ns() ^ time_util::monotonic_ns().rotate_left(32))
    }

    /// Current state word, e.g. to log the seed a run can be replayed from.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance the state and return it.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in `[min, max)`.
    #[inline]
    pub fn uniform_f32(&mut self, min: f32, max: f32) -> f32 {
        let normalized = (self.next_u64() & 0xFF_FFFF) as f32 / F32_SCALE;
        min + normalized * (max - min)
    }

    /// Uniform integer in `[min, max]`, inclusive.
    ///
    /// `max < min` is a caller bug: the result is unspecified but this never
    /// panics.
    #[inline]
    pub fn uniform_u32(&mut self, min: u32, max: u32) -> u32 {
        let span = max.wrapping_sub(min).wrapping_add(1) as u64;
        let x = self.next_u64();
        if span == 0 {
            return min.wrapping_add(x as u32);
        }
        min.wrapping_add((x % span) as u32)
    }

    /// 64-bit variant of [`uniform_u32`](Self::uniform_u32), same contract.
    #[inline]
    pub fn uniform_u64(&mut self, min: u64, max: u64) -> u64 {
        let span = max.wrapping_sub(min).wrapping_add(1);
        let x = self.next_u64();
        if span == 0 {
            return min.wrapping_add(x);
        }
        min.wrapping_add(x % span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sequence_from_seed_one() {
        // 1 ^ (1 << 13) = 0x2001; ^ (0x2001 >> 7) = 0x2041; ^ (0x2041 << 17)
        let mut rng = XorShift64::new(1);
        assert_eq!(rng.next_u64(), 0x4082_2041);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        let xs: Vec<u64> = (0..32).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..32).map(|_| b.next_u64()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = XorShift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn floats_stay_in_half_open_range() {
        let mut rng = XorShift64::new(7);
        for _ in 0..10_000 {
            let v = rng.uniform_f32(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn integers_cover_inclusive_range() {
        let mut rng = XorShift64::new(99);
        let mut seen = [false; 5];
        for _ in 0..1_000 {
            let v = rng.uniform_u32(10, 14);
            assert!((10..=14).contains(&v));
            seen[(v - 10) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn degenerate_ranges_do_not_panic() {
        let mut rng = XorShift64::new(3);
        assert_eq!(rng.uniform_u32(5, 5), 5);
        let _ = rng.uniform_u32(10, 2);
        let _ = rng.uniform_u32(0, u32::MAX);
        let _ = rng.uniform_u64(0, u64::MAX);
        let _ = rng.uniform_u64(9, 1);
    }

    #[test]
    fn clock_seed_is_usable() {
        let mut rng = XorShift64::from_clock();
        assert_ne!(rng.state(), 0);
        assert_ne!(rng.next_u64(), 0);
    }
}
