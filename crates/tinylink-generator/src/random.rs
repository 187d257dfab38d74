use crate::Generator;
use parking_lot::Mutex;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tinylink_core::Alias;

/// Alias length used when the caller does not configure one.
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Generates fixed-length aliases drawn uniformly from `[A-Za-z0-9]`.
///
/// The PRNG is seeded once when the generator is built and then shared by
/// every caller, so bursts of requests never see correlated output from a
/// re-seeded clock.
#[derive(Debug)]
pub struct RandomGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed. Output is reproducible.
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn next_string(&self) -> String {
        let mut rng = self.rng.lock();
        (&mut *rng)
            .sample_iter(Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = Alias;

    fn generate(&self) -> Self::Output {
        Alias::new_unchecked(self.next_string())
    }
}
