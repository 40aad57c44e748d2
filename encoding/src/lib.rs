//! Plaintext encoders: machine integers and doubles to and from
//! polynomials with coefficients modulo a plain modulus.
//!
//! [`BinaryEncoder`] writes the binary expansion of a value, one bit per
//! coefficient; [`BalancedEncoder`] writes a balanced odd-base expansion
//! with digits in `(-b/2, b/2]`. Negative digits are stored as their
//! modular complement. The fractional variants split the polynomial into a
//! low-degree integer block and a negated high-degree fraction block so
//! that the encrypted evaluation at `x = b` still recovers the value.
//!
//! Encoders freeze their configuration at construction; encode and decode
//! are pure functions of that state and the input.

mod fractional;
mod integer;

pub use fractional::{BalancedFractionalEncoder, BinaryFractionalEncoder};
pub use integer::{BalancedEncoder, BinaryEncoder};

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Encoders need at least two distinct coefficient values.
    #[error("plain modulus must be wider than one bit")]
    ModulusTooNarrow,
    /// Balanced expansion is defined for odd bases of at least 3.
    #[error("base must be odd and at least 3")]
    InvalidBase,
    /// Fractional layouts need k1 >= 1, k2 >= 1 and k1 + k2 <= degree.
    #[error("integer and fraction blocks do not fit the polynomial degree")]
    InvalidBlockSplit,
    /// The value's expansion needs more coefficients (or wider ones) than
    /// the encoder was configured with. Detected before anything is written.
    #[error("value does not fit the configured coefficient budget")]
    EncodingOverflow,
    /// The plaintext does not decode into the requested range: a negative
    /// total for an unsigned decode, an accumulator overflow, a coefficient
    /// outside the modulus, or a polynomial too large for the encoder.
    #[error("plaintext does not decode into the requested range")]
    DecodeOutOfRange,
}
