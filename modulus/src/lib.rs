//! Word-sized moduli with precomputed Barrett constants, plus the
//! number-theory predicates built on them.

mod small_modulus;

pub mod numth;

pub use small_modulus::SmallModulus;

use thiserror::Error;

/// Largest permitted modulus value is `2^62 - 1`.
pub const MAX_MODULUS_BITS: usize = 62;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A modulus must be 0 (unset) or lie in `[2, 2^62)`.
    #[error("modulus value {0} must be 0 or in [2, 2^62)")]
    ValueOutOfRange(u64),
    /// Text input was not a 64-bit hex value.
    #[error("malformed hex modulus")]
    Format,
}
