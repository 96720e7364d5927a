//! Non-deterministic cosmetic randomness
//!
//! Visual noise for renderers (node wobble, card fan angles). It reads the
//! thread-local OS-seeded generator and must never feed a generator in this
//! crate: nothing here is reproducible from a seed.

use rand::Rng;

/// Uniform offset in `[-range, range]`. Non-positive, NaN and infinite
/// ranges give 0.
pub fn jitter(range: f32) -> f32 {
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }
    // `-range..=range` has an infinite span above `f32::MAX / 2`.
    range * rand::thread_rng().gen_range(-1.0f32..=1.0)
}

/// Jitter both coordinates of a point.
pub fn jitter_point(x: f32, y: f32, range: f32) -> (f32, f32) {
    (x + jitter(range), y + jitter(range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_bounds() {
        for _ in 0..1000 {
            let j = jitter(2.5);
            assert!((-2.5..=2.5).contains(&j));
        }
        assert_eq!(jitter(0.0), 0.0);
        assert_eq!(jitter(-1.0), 0.0);
        assert_eq!(jitter(f32::NAN), 0.0);
        assert_eq!(jitter(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_jitter_huge_range() {
        for _ in 0..100 {
            let j = jitter(f32::MAX);
            assert!(j.is_finite());
            let j = jitter(f32::MAX / 3.0);
            assert!(j.abs() <= f32::MAX / 3.0);
        }
    }

    #[test]
    fn test_jitter_point_stays_close() {
        let (x, y) = jitter_point(10.0, 20.0, 1.0);
        assert!((9.0..=11.0).contains(&x));
        assert!((19.0..=21.0).contains(&y));
    }
}
