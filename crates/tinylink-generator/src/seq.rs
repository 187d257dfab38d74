use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::Alias;

/// A sequential alias generator.
///
/// This generator produces codes like "wh000000", "wh000001", etc. It is
/// predictable by design and meant for local debugging and tests; use
/// [`RandomGenerator`][crate::RandomGenerator] for public deployments.
///
/// Two instances with the same prefix produce the same sequence, so the
/// store will reject the second instance's codes as conflicts.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming after a restart against a persistent store.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = Alias;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Alias::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
