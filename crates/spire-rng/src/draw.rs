//! Counted draws over the bit engine
//!
//! Every public draw bumps the counter by exactly one, no matter how many raw
//! values the underlying algorithm consumed. This is the counter the
//! reference application persists and that save files carry.

use serde::{Deserialize, Serialize};

use crate::xs128::Xs128;
use crate::RngError;

/// The fixed draw surface shared by every stream.
///
/// Generators take `&mut impl Draw` so that a plain [`SpireRng`] and a
/// [`crate::Traced`] wrapper are interchangeable.
pub trait Draw {
    /// Number of counted draws since the last reseed.
    fn counter(&self) -> u32;

    /// Uniform integer in `[0, n]`.
    fn bounded_int_inclusive(&mut self, n: i32) -> Result<i32, RngError>;

    /// Uniform integer in `[a, b]`.
    fn ranged_int_inclusive(&mut self, a: i32, b: i32) -> Result<i32, RngError>;

    /// Integer in `[0, n)` through the double path, not the integer path.
    fn long_exclusive(&mut self, n: i64) -> Result<i64, RngError>;

    /// Integer in `[a, b)` through the double path.
    fn long_range(&mut self, a: i64, b: i64) -> Result<i64, RngError>;

    /// Raw 64-bit value.
    fn random_long(&mut self) -> i64;

    /// Fair coin from the low bit of a raw value.
    fn bool(&mut self) -> bool;

    /// `true` when a float draw lands below `p`.
    fn bool_chance(&mut self, p: f32) -> bool;

    /// Uniform float in `[0, 1)`.
    fn float01(&mut self) -> f32;

    /// Uniform float in `[a, b)`.
    fn float_range(&mut self, a: f32, b: f32) -> f32;

    /// Uniform float in `[0, r)`.
    fn float_scaled(&mut self, r: f32) -> f32;

    /// Fast-forward with canonical bool draws until `counter() == target`.
    ///
    /// A target at or behind the current counter is ignored.
    fn skip_to(&mut self, target: u32) {
        let current = self.counter();
        if target <= current {
            log::debug!("skip_to({target}) ignored: counter already at {current}");
            return;
        }
        for _ in current..target {
            self.bool();
        }
    }
}

/// Persistable view of a stream: raw state plus counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    pub lo: u64,
    pub hi: u64,
    pub counter: u32,
}

/// A seeded, counted stream (matches the reference `Random` wrapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpireRng {
    state: Xs128,
    seed: i64,
    counter: u32,
}

impl SpireRng {
    /// Fresh stream with counter 0.
    pub fn new(seed: i64) -> Self {
        Self {
            state: Xs128::new(seed),
            seed,
            counter: 0,
        }
    }

    /// Fresh stream fast-forwarded to `counter`.
    ///
    /// The reference constructor burns `random(999)` draws; each consumes one
    /// raw value, so the resulting sequence equals a bool fast-forward.
    pub fn with_counter(seed: i64, counter: u32) -> Self {
        let mut rng = Self::new(seed);
        for _ in 0..counter {
            let _ = rng.bounded_int_inclusive(999);
        }
        rng
    }

    /// Seed this stream was created from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Capture state and counter.
    pub fn snapshot(&self) -> RngSnapshot {
        let (lo, hi) = self.state.state();
        RngSnapshot {
            lo,
            hi,
            counter: self.counter,
        }
    }

    /// Put this stream back to a captured point.
    pub fn restore(&mut self, snapshot: RngSnapshot) {
        self.state = Xs128::from_state(snapshot.lo, snapshot.hi);
        self.counter = snapshot.counter;
    }

    #[inline]
    fn bump(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }
}

impl Draw for SpireRng {
    fn counter(&self) -> u32 {
        self.counter
    }

    fn bounded_int_inclusive(&mut self, n: i32) -> Result<i32, RngError> {
        let bound = n
            .checked_add(1)
            .filter(|b| *b > 0)
            .ok_or(RngError::InvalidBound {
                func: "bounded_int_inclusive",
                low: 0,
                high: n as i64,
            })?;
        self.bump();
        Ok(self.state.next_int_below(bound))
    }

    fn ranged_int_inclusive(&mut self, a: i32, b: i32) -> Result<i32, RngError> {
        let span = (b as i64) - (a as i64) + 1;
        if span <= 0 || span > i32::MAX as i64 {
            return Err(RngError::InvalidBound {
                func: "ranged_int_inclusive",
                low: a as i64,
                high: b as i64,
            });
        }
        self.bump();
        Ok(a + self.state.next_int_below(span as i32))
    }

    fn long_exclusive(&mut self, n: i64) -> Result<i64, RngError> {
        if n <= 0 {
            return Err(RngError::InvalidBound {
                func: "long_exclusive",
                low: 0,
                high: n,
            });
        }
        self.bump();
        Ok((self.state.next_double() * n as f64) as i64)
    }

    fn long_range(&mut self, a: i64, b: i64) -> Result<i64, RngError> {
        if b < a {
            return Err(RngError::InvalidBound {
                func: "long_range",
                low: a,
                high: b,
            });
        }
        self.bump();
        let span = b.wrapping_sub(a) as f64;
        Ok(a.wrapping_add((self.state.next_double() * span) as i64))
    }

    fn random_long(&mut self) -> i64 {
        self.bump();
        self.state.next_u64()
    }

    fn bool(&mut self) -> bool {
        self.bump();
        self.state.next_bool()
    }

    fn bool_chance(&mut self, p: f32) -> bool {
        self.bump();
        self.state.next_float() < p
    }

    fn float01(&mut self) -> f32 {
        self.bump();
        self.state.next_float()
    }

    fn float_range(&mut self, a: f32, b: f32) -> f32 {
        self.bump();
        a + self.state.next_float() * (b - a)
    }

    fn float_scaled(&mut self, r: f32) -> f32 {
        self.bump();
        self.state.next_float() * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_draw_counts_once() {
        let mut rng = SpireRng::new(42);
        rng.bounded_int_inclusive(5).unwrap();
        rng.ranged_int_inclusive(-3, 3).unwrap();
        rng.long_exclusive(10).unwrap();
        rng.long_range(5, 10).unwrap();
        rng.random_long();
        rng.bool();
        rng.bool_chance(0.0);
        rng.float01();
        rng.float_range(1.0, 2.0);
        rng.float_scaled(4.0);
        assert_eq!(rng.counter(), 10);
    }

    #[test]
    fn test_invalid_bounds_do_not_count() {
        let mut rng = SpireRng::new(42);
        assert!(rng.bounded_int_inclusive(-1).is_err());
        assert!(rng.bounded_int_inclusive(i32::MAX).is_err());
        assert!(rng.ranged_int_inclusive(5, 4).is_err());
        assert!(rng.long_exclusive(0).is_err());
        assert!(rng.long_range(3, 2).is_err());
        assert_eq!(rng.counter(), 0);
    }

    #[test]
    fn test_bounded_zero_is_a_draw() {
        let mut rng = SpireRng::new(42);
        assert_eq!(rng.bounded_int_inclusive(0).unwrap(), 0);
        assert_eq!(rng.counter(), 1);
    }

    #[test]
    fn test_bounds() {
        let mut rng = SpireRng::new(42);
        for _ in 0..1000 {
            let v = rng.bounded_int_inclusive(99).unwrap();
            assert!((0..=99).contains(&v));
            let r = rng.ranged_int_inclusive(-5, 5).unwrap();
            assert!((-5..=5).contains(&r));
            let l = rng.long_exclusive(7).unwrap();
            assert!((0..7).contains(&l));
            let f = rng.float_range(0.9, 1.1);
            assert!((0.9..=1.1).contains(&f));
        }
    }

    #[test]
    fn test_skip_to_forward() {
        let mut skipped = SpireRng::new(77);
        skipped.skip_to(40);
        assert_eq!(skipped.counter(), 40);

        let mut manual = SpireRng::new(77);
        for _ in 0..40 {
            manual.bool();
        }
        assert_eq!(skipped, manual);
    }

    #[test]
    fn test_skip_to_stale_is_noop() {
        let mut rng = SpireRng::new(77);
        rng.skip_to(10);
        let before = rng;
        rng.skip_to(10);
        rng.skip_to(3);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_with_counter_matches_skip_to() {
        let mut fast = SpireRng::with_counter(-9_000_000_001, 250);
        let mut slow = SpireRng::new(-9_000_000_001);
        slow.skip_to(250);
        assert_eq!(fast.counter(), 250);
        for _ in 0..20 {
            assert_eq!(fast.random_long(), slow.random_long());
        }
    }

    #[test]
    fn test_snapshot_restore() {
        let mut rng = SpireRng::new(5);
        rng.skip_to(17);
        let snap = rng.snapshot();
        let expected: Vec<i32> = (0..5).map(|_| rng.bounded_int_inclusive(99).unwrap()).collect();
        rng.restore(snap);
        assert_eq!(rng.counter(), 17);
        let replay: Vec<i32> = (0..5).map(|_| rng.bounded_int_inclusive(99).unwrap()).collect();
        assert_eq!(expected, replay);
    }

    #[test]
    fn test_long_exclusive_uses_double_path() {
        // Same raw value, different reduction: the double path scales the
        // top 53 bits, the integer path reduces the top 63 bits modulo n.
        let mut a = SpireRng::new(3);
        let mut b = Xs128::new(3);
        let expected = (b.next_double() * 1000.0) as i64;
        assert_eq!(a.long_exclusive(1000).unwrap(), expected);
    }
}
