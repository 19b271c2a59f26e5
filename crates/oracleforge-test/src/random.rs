//! Seeded random partial assignments.

use oracleforge_core::{Assignment, Fact, TruthValue};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws reproducible three-valued assignments.
///
/// ```
/// use oracleforge_core::Fact;
/// use oracleforge_test::RandomAssignment;
///
/// let facts: Vec<Fact> = (1..=4).map(|i| format!("p({i})").parse().unwrap()).collect();
/// let a = RandomAssignment::seeded(7).assignment(facts.clone());
/// let b = RandomAssignment::seeded(7).assignment(facts);
/// assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
/// ```
pub struct RandomAssignment {
    rng: ChaCha8Rng,
    undefined_ratio: f64,
}

impl RandomAssignment {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            undefined_ratio: 1.0 / 3.0,
        }
    }

    /// Probability that a drawn value is Undefined.
    pub fn with_undefined_ratio(mut self, ratio: f64) -> Self {
        self.undefined_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn truth(&mut self) -> TruthValue {
        if self.rng.random_bool(self.undefined_ratio) {
            TruthValue::Undefined
        } else {
            TruthValue::from_bool(self.rng.random_bool(0.5))
        }
    }

    pub fn int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..=high)
    }

    /// Observes every fact with a random value.
    pub fn assignment<I>(&mut self, facts: I) -> Assignment
    where
        I: IntoIterator<Item = Fact>,
    {
        let mut assignment = Assignment::new();
        for fact in facts {
            let value = self.truth();
            // A fact may repeat; the first draw wins.
            let _ = assignment.assign(fact, value);
        }
        assignment
    }
}
