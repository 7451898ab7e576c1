//! Seedable Xorshift64 PRNG.
//!
//! The animation is decorative but still wants reproducibility: the same
//! seed must place and steer particles identically across platforms, so
//! tests can assert on exact trajectories. The core algorithm is pure
//! integer arithmetic; floats only appear in the derived helpers.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shift constants (13, 7, 17).
///
/// A seed of 0 is the fixed point of the algorithm and is replaced with a
/// non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replacement for the all-zeros seed.
    const SEED_FALLBACK: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Creates a generator from `seed`, substituting a fixed non-zero
    /// fallback when `seed` is 0.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::SEED_FALLBACK } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), using the top 53 bits for full mantissa
    /// precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform angle in [0, 2π) radians.
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * std::f64::consts::TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_one_golden_value() {
        // First output of xorshift64(seed=1, shifts=13,7,17). A change here
        // means the algorithm changed and seeded animations replay
        // differently.
        let mut rng = Xorshift64::new(1);
        assert_eq!(rng.next_u64(), 1_082_269_761);
    }

    #[test]
    fn zero_seed_is_replaced() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn serde_round_trip_preserves_mid_stream_state() {
        let mut rng = Xorshift64::new(99);
        for _ in 0..25 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..64 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "out of range: {v}");
                }
            }

            #[test]
            fn next_range_respects_bounds(seed: u64, min in -1e4_f64..1e4, span in 1e-3_f64..1e4) {
                let max = min + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..64 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "{v} outside [{min}, {max})");
                }
            }

            #[test]
            fn next_angle_in_full_turn(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..64 {
                    let a = rng.next_angle();
                    prop_assert!((0.0..std::f64::consts::TAU).contains(&a));
                }
            }
        }
    }
}
