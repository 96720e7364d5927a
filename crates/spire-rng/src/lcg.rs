//! The reference runtime's 48-bit linear congruential generator
//!
//! Pools are shuffled once at run start by seeding this LCG from a stream's
//! raw long and running the runtime's collection shuffle over it. Only the
//! operations that shuffle needs are ported.

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaRandom {
    seed: u64,
}

impl JavaRandom {
    /// Scramble and store the seed (matches `Random(long)`).
    pub fn new(seed: i64) -> Self {
        Self {
            seed: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance and return the top `bits` bits (matches `Random.next`).
    fn next(&mut self, bits: u32) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.seed >> (48 - bits)) as u32 as i32
    }

    /// Raw 32-bit value.
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform value in `[0, bound)`; `bound` must be positive.
    pub fn next_int_below(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0);
        let m = bound - 1;
        let r = self.next(31);
        if bound & m == 0 {
            return ((bound as i64 * r as i64) >> 31) as i32;
        }
        let mut u = r;
        loop {
            let r = u % bound;
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next(31);
        }
    }

    /// In-place shuffle, swapping each position from the end with a lower
    /// index (matches `Collections.shuffle(list, rnd)`).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (2..=items.len()).rev() {
            let j = self.next_int_below(i as i32) as usize;
            items.swap(i - 1, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_scramble() {
        assert_eq!(JavaRandom::new(0).seed, MULTIPLIER);
        assert_eq!(JavaRandom::new(-1).seed, !MULTIPLIER & MASK);
    }

    #[test]
    fn test_power_of_two_bound_uses_high_bits() {
        let mut a = JavaRandom::new(123);
        let mut b = JavaRandom::new(123);
        for _ in 0..100 {
            let r = b.next(31);
            assert_eq!(a.next_int_below(16), ((16i64 * r as i64) >> 31) as i32);
        }
    }

    #[test]
    fn test_bounds() {
        let mut rng = JavaRandom::new(-42);
        for bound in 1..50 {
            let v = rng.next_int_below(bound);
            assert!((0..bound).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_is_permutation_and_deterministic() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        JavaRandom::new(99).shuffle(&mut a);
        JavaRandom::new(99).shuffle(&mut b);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_short_lists() {
        let mut empty: Vec<u8> = vec![];
        JavaRandom::new(1).shuffle(&mut empty);
        let mut one = vec![7];
        JavaRandom::new(1).shuffle(&mut one);
        assert_eq!(one, vec![7]);
    }
}
