use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Geometric level selection driven by a seeded generator owned by the set.
///
/// `P(level = k) = 2^-k` for `k < cap`; the remaining mass collapses onto `cap`.
#[derive(Clone, Debug)]
pub(crate) struct LevelGenerator {
    rng: SmallRng,
}

impl LevelGenerator {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Flips a fair coin until heads or until the level reaches `cap`.
    pub(crate) fn random(&mut self, cap: usize) -> usize {
        let mut level = 1;
        while level < cap && !self.rng.r#gen::<bool>() {
            level += 1;
        }
        level
    }
}

/// Level of the element at 1-based `position` in a perfectly balanced skip list.
///
/// Every second element reaches level 2, every fourth level 3, and so on.
pub(crate) fn perfect_level(position: usize, cap: usize) -> usize {
    debug_assert!(position > 0, "positions are 1-based");
    (position.trailing_zeros() as usize + 1).min(cap)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_levels() {
        let mut a = LevelGenerator::new(42);
        let mut b = LevelGenerator::new(42);
        for _ in 0..1_000 {
            assert_eq!(a.random(16), b.random(16));
        }
    }

    #[test]
    fn cap_of_one_always_yields_one() {
        let mut levels = LevelGenerator::new(7);
        for _ in 0..100 {
            assert_eq!(levels.random(1), 1);
        }
    }

    #[test]
    fn distribution_is_roughly_geometric() {
        let mut levels = LevelGenerator::new(0xDEAD_BEEF);
        let mut histogram = [0usize; 17];
        let samples = 64_000;
        for _ in 0..samples {
            histogram[levels.random(16)] += 1;
        }
        // Expect ~1/2 at level 1 and ~1/4 at level 2, with generous slack.
        assert!((28_000..36_000).contains(&histogram[1]), "{histogram:?}");
        assert!((13_000..19_000).contains(&histogram[2]), "{histogram:?}");
        assert!(histogram[3] > histogram[5]);
    }

    #[test]
    fn perfect_levels() {
        let levels: [usize; 8] = core::array::from_fn(|i| perfect_level(i + 1, 16));
        assert_eq!(levels, [1, 2, 1, 3, 1, 2, 1, 4]);
        assert_eq!(perfect_level(1024, 4), 4);
    }

    proptest! {
        #[test]
        fn random_level_within_bounds(seed in any::<u64>(), cap in 1usize..32) {
            let mut levels = LevelGenerator::new(seed);
            for _ in 0..64 {
                let level = levels.random(cap);
                prop_assert!((1..=cap).contains(&level));
            }
        }
    }
}
