//! Randomness for arrivals and courier delays.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub trait Randomness: Send + Sync {
    /// Bernoulli draw: true with probability `probability`.
    fn arrival_fires(&self, probability: f64) -> bool;

    /// A delay drawn uniformly from `window`.
    fn pickup_delay(&self, window: RangeInclusive<Duration>) -> Duration;
}

fn bernoulli<R: Rng>(rng: &mut R, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

fn uniform_delay<R: Rng>(rng: &mut R, window: RangeInclusive<Duration>) -> Duration {
    let (min, max) = window.into_inner();
    if max <= min {
        return min;
    }
    let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(rng.gen_range(min_ms..=max_ms))
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl Randomness for ThreadRandom {
    fn arrival_fires(&self, probability: f64) -> bool {
        bernoulli(&mut rand::thread_rng(), probability)
    }

    fn pickup_delay(&self, window: RangeInclusive<Duration>) -> Duration {
        uniform_delay(&mut rand::thread_rng(), window)
    }
}

/// Reproducible draws from a seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Randomness for SeededRandom {
    fn arrival_fires(&self, probability: f64) -> bool {
        bernoulli(&mut *self.rng(), probability)
    }

    fn pickup_delay(&self, window: RangeInclusive<Duration>) -> Duration {
        uniform_delay(&mut *self.rng(), window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let window = Duration::from_secs(2)..=Duration::from_secs(6);
        for _ in 0..20 {
            assert_eq!(a.arrival_fires(0.325), b.arrival_fires(0.325));
            assert_eq!(a.pickup_delay(window.clone()), b.pickup_delay(window.clone()));
        }
    }

    #[test]
    fn test_delay_stays_in_window() {
        let random = ThreadRandom;
        let window = Duration::from_millis(2_000)..=Duration::from_millis(6_000);
        for _ in 0..200 {
            let delay = random.pickup_delay(window.clone());
            assert!(window.contains(&delay), "{:?}", delay);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let random = SeededRandom::new(1);
        let fixed = Duration::from_secs(3);
        assert_eq!(random.pickup_delay(fixed..=fixed), fixed);
        assert!(!random.arrival_fires(0.0));
        assert!(random.arrival_fires(1.0));
        assert!(random.arrival_fires(7.5));
    }
}
