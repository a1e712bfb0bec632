//! Determinant challenge generator.
//!
//! Draws random 2x2 matrices with entries in [1, 9] and never hands out the
//! same matrix twice while its exclusion set lives.

use std::collections::HashSet;

use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

/// Smallest matrix entry.
pub const MIN_ENTRY: i32 = 1;
/// Largest matrix entry.
pub const MAX_ENTRY: i32 = 9;
/// Number of distinct ordered quadruples the generator can produce.
pub const MATRIX_SPACE: usize = 9 * 9 * 9 * 9;

/// A 2x2 integer matrix `[[a, b], [c, d]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix2(pub [[i32; 2]; 2]);

impl Matrix2 {
    pub fn determinant(&self) -> i32 {
        let [[a, b], [c, d]] = self.0;
        a * d - b * c
    }

    /// Canonical key used by the exclusion set.
    pub fn key(&self) -> MatrixKey {
        let [[a, b], [c, d]] = self.0;
        MatrixKey([a, b, c, d])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixKey(pub [i32; 4]);

/// A matrix together with its determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub matrix: Matrix2,
    pub determinant: i32,
}

/// Draw a matrix whose key is not in `exclude`, record it there and return it.
///
/// Rejection sampling: redraws until a novel key comes up. A fully used set is
/// cleared first so the loop always terminates.
pub fn generate<R: Rng>(exclude: &mut HashSet<MatrixKey>, rng: &mut R) -> Challenge {
    if exclude.len() >= MATRIX_SPACE {
        debug!("[MatrixGenerator] All {} matrices used, starting a new cycle", MATRIX_SPACE);
        exclude.clear();
    }

    loop {
        let matrix = Matrix2([
            [rng.random_range(MIN_ENTRY..=MAX_ENTRY), rng.random_range(MIN_ENTRY..=MAX_ENTRY)],
            [rng.random_range(MIN_ENTRY..=MAX_ENTRY), rng.random_range(MIN_ENTRY..=MAX_ENTRY)],
        ]);
        if exclude.insert(matrix.key()) {
            return Challenge {
                matrix,
                determinant: matrix.determinant(),
            };
        }
    }
}

/// Stateful generator owning the exclusion set of one round.
#[derive(Debug, Default, Clone)]
pub struct MatrixGenerator {
    used: HashSet<MatrixKey>,
}

impl MatrixGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Challenge {
        generate(&mut self.used, rng)
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_determinant() {
        assert_eq!(Matrix2([[3, 8], [4, 6]]).determinant(), -14);
        assert_eq!(Matrix2([[2, 1], [1, 2]]).determinant(), 3);
        assert_eq!(Matrix2([[5, 5], [5, 5]]).determinant(), 0);
    }

    #[test]
    fn test_entries_in_range_and_determinant_matches() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = MatrixGenerator::new();
        for _ in 0..500 {
            let challenge = generator.generate(&mut rng);
            assert!(challenge.matrix.0.iter().flatten().all(|v| (MIN_ENTRY..=MAX_ENTRY).contains(v)));
            let [[a, b], [c, d]] = challenge.matrix.0;
            assert_eq!(challenge.determinant, a * d - b * c);
        }
    }

    #[test]
    fn test_no_repeat_within_set_lifetime() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut used = HashSet::new();
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            let challenge = generate(&mut used, &mut rng);
            assert!(seen.insert(challenge.matrix), "matrix {:?} repeated", challenge.matrix);
        }
        assert_eq!(used.len(), 2000);
    }

    #[test]
    fn test_exhausted_set_starts_new_cycle() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut used: HashSet<MatrixKey> = (MIN_ENTRY..=MAX_ENTRY)
            .flat_map(|a| (MIN_ENTRY..=MAX_ENTRY).map(move |b| (a, b)))
            .flat_map(|(a, b)| {
                (MIN_ENTRY..=MAX_ENTRY)
                    .flat_map(move |c| (MIN_ENTRY..=MAX_ENTRY).map(move |d| MatrixKey([a, b, c, d])))
            })
            .collect();
        assert_eq!(used.len(), MATRIX_SPACE);

        generate(&mut used, &mut rng);
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_reset_clears_used_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut generator = MatrixGenerator::new();
        generator.generate(&mut rng);
        generator.generate(&mut rng);
        assert_eq!(generator.used_count(), 2);
        generator.reset();
        assert_eq!(generator.used_count(), 0);
    }
}
