//! xorshift128+ bit engine
//!
//! Faithful port of the reference runtime's `RandomXS128`: a 128-bit
//! xorshift+ generator whose two state words are derived from the seed with
//! two rounds of the murmur3 64-bit finalizer.

use serde::{Deserialize, Serialize};

const MURMUR_C1: u64 = 0xff51_afd7_ed55_8ccd;
const MURMUR_C2: u64 = 0xc4ce_b9fe_1a85_ec53;

/// 2^-53, scales the top 53 bits of a raw draw into [0, 1)
const NORM_DOUBLE: f64 = 1.0 / (1u64 << 53) as f64;
/// 2^-24, scales the top 24 bits of a raw draw into [0, 1)
const NORM_FLOAT: f64 = 1.0 / (1u64 << 24) as f64;

/// murmur3 64-bit finalizer (fmix64)
#[inline]
pub fn murmur_hash3(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(MURMUR_C1);
    x ^= x >> 33;
    x = x.wrapping_mul(MURMUR_C2);
    x ^= x >> 33;
    x
}

/// Raw generator state: the two xorshift words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Xs128 {
    lo: u64,
    hi: u64,
}

impl Xs128 {
    /// Seed the generator (matches `RandomXS128.setSeed`).
    ///
    /// A zero seed is replaced by `i64::MIN`, otherwise the state would
    /// collapse to all zeros.
    pub fn new(seed: i64) -> Self {
        let seed = if seed == 0 { i64::MIN } else { seed };
        let lo = murmur_hash3(seed as u64);
        let hi = murmur_hash3(lo);
        Self { lo, hi }
    }

    /// Rebuild a generator from persisted state words.
    pub const fn from_state(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// Current `(lo, hi)` state words.
    pub const fn state(&self) -> (u64, u64) {
        (self.lo, self.hi)
    }

    /// Advance once and return the raw 64-bit value, signed like the
    /// reference runtime's `long`.
    #[inline]
    pub fn next_u64(&mut self) -> i64 {
        let mut s1 = self.lo;
        let s0 = self.hi;
        self.lo = s0;
        s1 ^= s1 << 23;
        self.hi = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
        self.hi.wrapping_add(s0) as i64
    }

    /// Uniform value in `[0, n)` by rejection on the top 63 bits.
    ///
    /// `n` must be positive; callers validate before getting here. Retries
    /// are internal and consume extra raw values.
    pub fn next_long_below(&mut self, n: i64) -> i64 {
        debug_assert!(n > 0);
        loop {
            let bits = ((self.next_u64() as u64) >> 1) as i64;
            let value = bits % n;
            if bits.wrapping_sub(value).wrapping_add(n - 1) >= 0 {
                return value;
            }
        }
    }

    /// Uniform value in `[0, n)`; same bit consumption as [`Self::next_long_below`].
    #[inline]
    pub fn next_int_below(&mut self, n: i32) -> i32 {
        self.next_long_below(n as i64) as i32
    }

    /// Uniform double in `[0, 1)` from the top 53 bits.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        ((self.next_u64() as u64) >> 11) as f64 * NORM_DOUBLE
    }

    /// Uniform float in `[0, 1)` from the top 24 bits.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        (((self.next_u64() as u64) >> 40) as f64 * NORM_FLOAT) as f32
    }

    /// Lowest bit of a raw draw.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 != 0
    }
}
