//! Random integer sources used for request ids

use std::fmt;
use std::ops::RangeInclusive;

use rand::rngs::OsRng;
use rand::Rng;

/// Draws a uniformly distributed integer from an inclusive range
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Uniform draw from `range`, both ends included
    fn next_in_range(&self, range: RangeInclusive<u64>) -> u64;
}

/// Operating system CSPRNG. Default for outgoing requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_in_range(&self, range: RangeInclusive<u64>) -> u64 {
        OsRng.gen_range(range)
    }
}

/// Thread-local generator, seeded from the OS once per thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, range: RangeInclusive<u64>) -> u64 {
        rand::thread_rng().gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_stay_in_range() {
        let sources: [&dyn RandomSource; 2] = [&OsRandom, &ThreadRandom];
        for source in sources {
            for _ in 0..1000 {
                let n = source.next_in_range(10..=12);
                assert!((10..=12).contains(&n));
            }
        }
    }

    #[test]
    fn test_single_value_range() {
        assert_eq!(OsRandom.next_in_range(7..=7), 7);
    }
}
