//! Per-tick step distribution
//!
//! Each tick a racer moves 0, 1 or 2 columns. The odds depend on the
//! racer's fitness for the race:
//!
//! ```text
//! F = rating_for(terrain) - DISTANCE_PENALTY_PER_FURLONG * |preferred_length - length|
//! ```
//!
//! At `F = 50` the step probabilities are `(0.3, 0.5, 0.2)`. Every fitness
//! point above 50 moves 0.01 from the "stand still" bucket to the "two
//! columns" bucket (and the reverse below 50). Negative buckets are clamped
//! to zero and the triple is renormalized. The middle bucket never changes,
//! so every racer keeps a positive chance of moving forward.

use rand::Rng;

use super::horse::{Horse, Terrain};
use crate::consts::*;

/// Fitness of a horse for a given race
pub fn fitness(horse: &Horse, terrain: Terrain, length: f64) -> f64 {
    let penalty = DISTANCE_PENALTY_PER_FURLONG * (horse.preferred_length - length).abs();
    horse.rating_for(terrain) as f64 - penalty
}

/// Probabilities of stepping 0, 1 or 2 columns in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDistribution {
    pub p: [f64; 3],
}

impl StepDistribution {
    /// Reference distribution for a fitness score
    ///
    /// The shift saturates at one full bucket either way; a NaN fitness
    /// counts as the least fit.
    pub fn for_fitness(fitness: f64) -> Self {
        let shift = (STEP_SHIFT_PER_FITNESS * (fitness - STEP_PIVOT_FITNESS))
            .max(-1.0)
            .min(1.0);
        let [b0, b1, b2] = STEP_PIVOT_PROBABILITIES;
        let raw = [(b0 - shift).max(0.0), b1.max(0.0), (b2 + shift).max(0.0)];
        let total: f64 = raw.iter().sum();
        Self {
            p: raw.map(|v| v / total),
        }
    }

    /// Expected columns per tick
    pub fn mean(&self) -> f64 {
        self.p[1] + 2.0 * self.p[2]
    }

    /// Draw one step
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let u: f64 = rng.random();
        if u < self.p[0] {
            0
        } else if u < self.p[0] + self.p[1] {
            1
        } else {
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pivot_distribution() {
        let d = StepDistribution::for_fitness(50.0);
        assert!(close(d.p[0], 0.3));
        assert!(close(d.p[1], 0.5));
        assert!(close(d.p[2], 0.2));
    }

    #[test]
    fn test_clamped_and_renormalized() {
        // F = 100: (-0.2, 0.5, 0.7) -> (0, 0.5, 0.7) / 1.2
        let d = StepDistribution::for_fitness(100.0);
        assert!(close(d.p[0], 0.0));
        assert!(close(d.p[1], 0.5 / 1.2));
        assert!(close(d.p[2], 0.7 / 1.2));
        assert!(close(d.p.iter().sum::<f64>(), 1.0));

        let d = StepDistribution::for_fitness(-25.0);
        assert!(close(d.p[2], 0.0));
        assert!(d.p[1] > 0.0);
    }

    #[test]
    fn test_extreme_fitness_stays_a_distribution() {
        for f in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e12, -1e12] {
            let d = StepDistribution::for_fitness(f);
            assert!(d.p.iter().all(|p| p.is_finite() && *p >= 0.0), "F = {f}: {d:?}");
            assert!(close(d.p.iter().sum::<f64>(), 1.0), "F = {f}: {d:?}");
            assert!(d.p[1] > 0.0);
        }
        // NaN fitness is treated like the worst horse, never the best
        let nan = StepDistribution::for_fitness(f64::NAN);
        assert_eq!(nan, StepDistribution::for_fitness(f64::NEG_INFINITY));
        assert!(nan.mean() < StepDistribution::for_fitness(50.0).mean());

        let endless = Horse::new("Endless", 1, 1, 1, f64::INFINITY);
        let d = StepDistribution::for_fitness(fitness(&endless, Terrain::Dirt, 6.0));
        assert!(d.mean() < StepDistribution::for_fitness(100.0).mean());
    }

    #[test]
    fn test_mean_increases_with_fitness() {
        let mut last = f64::MIN;
        for f in (-50..=150).step_by(10) {
            let mean = StepDistribution::for_fitness(f as f64).mean();
            assert!(mean >= last, "mean dropped at F = {f}");
            last = mean;
        }
    }

    #[test]
    fn test_matching_length_has_no_penalty() {
        let horse = Horse::new("Even", 40, 60, 70, 7.0);
        assert!(close(fitness(&horse, Terrain::Dirt, 7.0), 70.0));
        assert!(close(fitness(&horse, Terrain::Grass, 9.0), 50.0));
    }

    #[test]
    fn test_fast_horse_outpaces_slow_horse() {
        let fast = Horse::new("Fast", 90, 90, 90, 5.0);
        let slow = Horse::new("Slow", 10, 10, 10, 12.0);
        let fast_d = StepDistribution::for_fitness(fitness(&fast, Terrain::Dirt, 5.0));
        let slow_d = StepDistribution::for_fitness(fitness(&slow, Terrain::Dirt, 5.0));

        let mut rng = Pcg32::seed_from_u64(2024);
        let ticks = 10_000;
        let fast_total: u32 = (0..ticks).map(|_| fast_d.sample(&mut rng)).sum();
        let slow_total: u32 = (0..ticks).map(|_| slow_d.sample(&mut rng)).sum();
        let fast_mean = fast_total as f64 / ticks as f64;
        let slow_mean = slow_total as f64 / ticks as f64;

        // Expected means are ~1.55 and ~0.32; the std error at 10^4 draws is < 0.01
        assert!(fast_mean - slow_mean > 1.0, "fast {fast_mean} vs slow {slow_mean}");
        assert!((fast_mean - fast_d.mean()).abs() < 0.05);
        assert!((slow_mean - slow_d.mean()).abs() < 0.05);
    }
}
