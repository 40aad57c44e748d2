use arith::{BigPoly, BigUInt};
use modulus::numth;

use crate::{EncryptionParameters, COEFF_MOD_COUNT_BOUND, USER_MODULO_BIT_BOUND};

/// Capability flags derived from one parameter snapshot.
///
/// `parameters_set` means the snapshot is usable at all; the remaining flags
/// name optional fast paths. `enable_fft` and `enable_nussbaumer` depend only
/// on the polynomial modulus shape and can be true on an otherwise rejected
/// snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParameterQualifiers {
    pub parameters_set: bool,
    pub enable_fft: bool,
    pub enable_ntt: bool,
    pub enable_batching: bool,
    pub enable_fast_plain_lift: bool,
    pub enable_relinearization: bool,
    pub enable_nussbaumer: bool,
}

/// Qualifiers together with the coefficient modulus product, which is
/// reported as soon as the chain itself passes inspection even if a later
/// check rejects the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub qualifiers: ParameterQualifiers,
    pub total_coeff_modulus: BigUInt,
}

/// Degree of a `x^n + 1` polynomial with n a power of two, if that is the
/// exact shape of `poly`.
fn power_of_two_cyclotomic_degree(poly: &BigPoly) -> Option<usize> {
    let sig = poly.significant_coeff_count();
    if sig < 2 {
        return None;
    }
    let degree = sig - 1;
    if !degree.is_power_of_two() {
        return None;
    }
    let one = |i: usize| poly.coeff(i).is_ok_and(|c| c.to_u64() == Some(1));
    if !one(0) || !one(degree) {
        return None;
    }
    if (1..degree).any(|i| poly.coeff(i).is_ok_and(|c| !c.is_zero())) {
        return None;
    }
    Some(degree)
}

/// Runs the ordered qualification checks over a parameter snapshot.
///
/// Each failed check stops the sequence with whatever flags were already
/// earned; nothing here returns an error. The order is observable: a
/// negative noise deviation still reports `enable_fft` because the shape
/// check runs first, while a broken modulus chain reports nothing.
pub fn validate(parms: &EncryptionParameters) -> Validation {
    let mut out = Validation::default();
    let q = &mut out.qualifiers;

    let coeff_modulus = parms.coeff_modulus();
    if coeff_modulus.is_empty() || coeff_modulus.len() > COEFF_MOD_COUNT_BOUND {
        return out;
    }

    let plain = parms.plain_modulus().value();
    if plain < 2 || plain >> USER_MODULO_BIT_BOUND != 0 {
        return out;
    }

    for (i, m) in coeff_modulus.iter().enumerate() {
        let value = m.value();
        if value < 2 || value >> USER_MODULO_BIT_BOUND != 0 {
            return out;
        }
        if coeff_modulus[..i]
            .iter()
            .any(|other| !numth::are_coprime(value, other.value()))
        {
            return out;
        }
        if !numth::are_coprime(value, plain) {
            return out;
        }
    }

    let mut total = BigUInt::from(1u64);
    for m in coeff_modulus {
        total = total.mul_u64(m.value());
    }
    out.total_coeff_modulus = total;

    if BigUInt::from(plain) >= out.total_coeff_modulus {
        return out;
    }

    if parms.poly_modulus().is_zero() {
        return out;
    }
    let Some(degree) = power_of_two_cyclotomic_degree(parms.poly_modulus()) else {
        return out;
    };
    q.enable_fft = true;
    q.enable_nussbaumer = true;

    if parms.noise_standard_deviation() < 0.0 || parms.noise_max_deviation() < 0.0 {
        return out;
    }
    q.parameters_set = true;

    let dbc = parms.decomposition_bit_count();
    if dbc > 0 {
        if dbc < out.total_coeff_modulus.significant_bit_count() {
            q.enable_relinearization = true;
        } else {
            q.parameters_set = false;
            return out;
        }
    }

    q.enable_ntt = true;
    for m in coeff_modulus {
        if !numth::admits_2nth_root(m, degree as u64) {
            q.enable_ntt = false;
            q.parameters_set = false;
            return out;
        }
    }

    q.enable_batching = numth::is_proper_plain_root(parms.plain_modulus(), degree as u64);

    q.enable_fast_plain_lift = coeff_modulus.iter().all(|m| m.value() > plain);

    out
}
