//! Number-theory predicates used when qualifying parameter sets.

use prime_factorization::Factorization;

pub use num_integer::gcd;
pub use primality_test::is_prime;

use crate::SmallModulus;

#[inline]
pub fn are_coprime(a: u64, b: u64) -> bool {
    gcd(a, b) == 1
}

/// `base^exponent` under `modulus`, squaring through the Barrett constants.
pub fn pow_mod(base: u64, mut exponent: u64, modulus: &SmallModulus) -> u64 {
    debug_assert!(!modulus.is_zero());
    let mut result = 1u64;
    let mut base = modulus.reduce(base);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = modulus.reduce_u128(result as u128 * base as u128);
        }
        base = modulus.reduce_u128(base as u128 * base as u128);
        exponent >>= 1;
    }
    result
}

/// Every prime factor of the modulus is congruent to 1 mod 2n, which makes a
/// primitive 2n-th root of unity available and with it a negacyclic
/// transform of length n.
pub fn admits_2nth_root(modulus: &SmallModulus, n: u64) -> bool {
    debug_assert!(n.is_power_of_two());
    let value = modulus.value();
    if value <= 1 {
        return false;
    }
    let two_n = 2 * n;
    Factorization::run(value)
        .prime_factor_repr()
        .iter()
        .all(|&(p, _)| p % two_n == 1)
}

/// A plain modulus supports batching when it is a prime congruent to
/// 1 mod 2n.
pub fn is_proper_plain_root(modulus: &SmallModulus, n: u64) -> bool {
    debug_assert!(n.is_power_of_two());
    let value = modulus.value();
    value % (2 * n) == 1 && is_prime(value)
}
