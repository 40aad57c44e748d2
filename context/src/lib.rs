//! Encryption parameter records and the capability-qualifier engine.
//!
//! [`EncryptionParameters`] is a passive bundle of the polynomial modulus,
//! the coefficient modulus chain, the plaintext modulus, the noise widths
//! and the decomposition bit count. [`validate`] inspects a snapshot of
//! those fields and reports which fast paths they admit. Validation never
//! fails; semantically broken parameters degrade to an all-false
//! [`ParameterQualifiers`].

mod parameters;
mod qualifiers;

pub use parameters::EncryptionParameters;
pub use qualifiers::{validate, ParameterQualifiers, Validation};

/// Coefficient modulus chains longer than this are rejected outright.
pub const COEFF_MOD_COUNT_BOUND: usize = 62;

/// Plain and coefficient moduli must stay below `2^60`.
pub const USER_MODULO_BIT_BOUND: usize = 60;
