//! Alias generators.
//!
//! Generators are used when a caller does not pick an alias. They are not
//! required to be globally unique: collisions are caught by the store's
//! uniqueness constraint and handled by the shortener service.

pub mod random;
pub mod seq;

pub use random::{RandomGenerator, DEFAULT_ALIAS_LENGTH};
pub use seq::SeqGenerator;

use tinylink_core::Alias;

/// Trait for generating aliases.
///
/// Implementations are pure generators that don't interact with storage.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Alias>;

    /// Generates a value that can be converted into an alias.
    fn generate(&self) -> Self::Output;
}
