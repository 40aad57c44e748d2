use arith::{BigPoly, BigUInt, CoeffView};

use crate::Error;

/// Sign-magnitude reading of one coefficient: values at or above
/// `ceil(M/2)` are the negative representatives.
fn signed_coeff(
    modulus: &BigUInt,
    neg_threshold: &BigUInt,
    coeff: &CoeffView<'_>,
) -> Result<(u64, bool), Error> {
    if coeff.significant_bit_count() > modulus.significant_bit_count() {
        return Err(Error::DecodeOutOfRange);
    }
    let value = coeff.to_big_uint();
    if value >= *neg_threshold {
        let magnitude = modulus
            .checked_sub(&value)
            .ok_or(Error::DecodeOutOfRange)?
            .to_u64()
            .ok_or(Error::DecodeOutOfRange)?;
        Ok((magnitude, true))
    } else {
        let magnitude = value.to_u64().ok_or(Error::DecodeOutOfRange)?;
        Ok((magnitude, false))
    }
}

/// Signed Horner evaluation at `x`, failing on any step that leaves i64.
fn decode_signed(
    poly: &BigPoly,
    x: u64,
    modulus: &BigUInt,
    neg_threshold: &BigUInt,
) -> Result<i64, Error> {
    let mut result: i64 = 0;
    for i in (0..poly.significant_coeff_count()).rev() {
        let coeff = poly.coeff(i).map_err(|_| Error::DecodeOutOfRange)?;
        let (magnitude, negative) = signed_coeff(modulus, neg_threshold, &coeff)?;
        let magnitude = i64::try_from(magnitude).map_err(|_| Error::DecodeOutOfRange)?;
        let term = if negative { -magnitude } else { magnitude };
        result = result
            .checked_mul(x as i64)
            .and_then(|r| r.checked_add(term))
            .ok_or(Error::DecodeOutOfRange)?;
    }
    Ok(result)
}

/// Like [`decode_signed`] but with a wide accumulator, so cancelling
/// negative coefficients may appear anywhere as long as the total is an
/// unsigned 64-bit value.
fn decode_unsigned(
    poly: &BigPoly,
    x: u64,
    modulus: &BigUInt,
    neg_threshold: &BigUInt,
) -> Result<u64, Error> {
    let mut result: i128 = 0;
    for i in (0..poly.significant_coeff_count()).rev() {
        let coeff = poly.coeff(i).map_err(|_| Error::DecodeOutOfRange)?;
        let (magnitude, negative) = signed_coeff(modulus, neg_threshold, &coeff)?;
        let term = if negative {
            -(magnitude as i128)
        } else {
            magnitude as i128
        };
        result = result
            .checked_mul(x as i128)
            .and_then(|r| r.checked_add(term))
            .ok_or(Error::DecodeOutOfRange)?;
    }
    if result < 0 || result > u64::MAX as i128 {
        return Err(Error::DecodeOutOfRange);
    }
    Ok(result as u64)
}

/// Base-2 positional encoder. Coefficient i of the plaintext is bit i of
/// the value; negative values use `M - 1` in place of each set bit.
#[derive(Clone, Debug)]
pub struct BinaryEncoder {
    plain_modulus: BigUInt,
    neg_threshold: BigUInt,
    neg_one: BigUInt,
}

impl BinaryEncoder {
    pub fn new(plain_modulus: BigUInt) -> Result<Self, Error> {
        if plain_modulus.significant_bit_count() <= 1 {
            return Err(Error::ModulusTooNarrow);
        }
        let neg_threshold = plain_modulus.half_round_up();
        let neg_one = plain_modulus
            .checked_sub_u64(1)
            .ok_or(Error::ModulusTooNarrow)?;
        Ok(Self {
            plain_modulus,
            neg_threshold,
            neg_one,
        })
    }

    #[inline]
    pub fn plain_modulus(&self) -> &BigUInt {
        &self.plain_modulus
    }

    /// Zero encodes to the empty polynomial.
    pub fn encode_u64(&self, value: u64) -> Result<BigPoly, Error> {
        let bits = 64 - value.leading_zeros() as usize;
        let mut poly = BigPoly::new(bits, 1);
        for i in 0..bits {
            if value >> i & 1 != 0 {
                poly.coeff_mut(i)
                    .and_then(|mut c| c.set_u64(1))
                    .map_err(|_| Error::EncodingOverflow)?;
            }
        }
        Ok(poly)
    }

    pub fn encode_i64(&self, value: i64) -> Result<BigPoly, Error> {
        if value >= 0 {
            return self.encode_u64(value as u64);
        }
        let magnitude = value.unsigned_abs();
        let bits = 64 - magnitude.leading_zeros() as usize;
        let mut poly = BigPoly::new(bits, self.neg_one.significant_bit_count());
        for i in 0..bits {
            if magnitude >> i & 1 != 0 {
                poly.coeff_mut(i)
                    .and_then(|mut c| c.set_big_uint(&self.neg_one))
                    .map_err(|_| Error::EncodingOverflow)?;
            }
        }
        Ok(poly)
    }

    pub fn decode_u64(&self, poly: &BigPoly) -> Result<u64, Error> {
        decode_unsigned(poly, 2, &self.plain_modulus, &self.neg_threshold)
    }

    pub fn decode_u32(&self, poly: &BigPoly) -> Result<u32, Error> {
        u32::try_from(self.decode_u64(poly)?).map_err(|_| Error::DecodeOutOfRange)
    }

    pub fn decode_i64(&self, poly: &BigPoly) -> Result<i64, Error> {
        decode_signed(poly, 2, &self.plain_modulus, &self.neg_threshold)
    }

    pub fn decode_i32(&self, poly: &BigPoly) -> Result<i32, Error> {
        i32::try_from(self.decode_i64(poly)?).map_err(|_| Error::DecodeOutOfRange)
    }

    pub(crate) fn decode_coeff_i64(&self, coeff: &CoeffView<'_>) -> Result<i64, Error> {
        let (magnitude, negative) =
            signed_coeff(&self.plain_modulus, &self.neg_threshold, coeff)?;
        let magnitude = i64::try_from(magnitude).map_err(|_| Error::DecodeOutOfRange)?;
        Ok(if negative { -magnitude } else { magnitude })
    }
}

/// Balanced odd-base positional encoder: digits lie in `(-b/2, b/2]` and
/// negative digits are stored as `M - |digit|`.
#[derive(Clone, Debug)]
pub struct BalancedEncoder {
    plain_modulus: BigUInt,
    neg_threshold: BigUInt,
    base: u64,
}

/// Balanced digits of `value`, least significant first. The final digit is
/// never zero, so the digit count is also the coefficient count.
pub(crate) fn balanced_digits(mut value: u64, base: u64) -> Vec<i64> {
    let mut digits = Vec::new();
    while value != 0 {
        let remainder = value % base;
        digits.push(if remainder <= base / 2 {
            remainder as i64
        } else {
            remainder as i64 - base as i64
        });
        value = ((value as u128 + (base / 2) as u128) / base as u128) as u64;
    }
    digits
}

impl BalancedEncoder {
    pub fn new(plain_modulus: BigUInt, base: u64) -> Result<Self, Error> {
        if base < 3 || base % 2 == 0 {
            return Err(Error::InvalidBase);
        }
        if plain_modulus.significant_bit_count() <= 1 {
            return Err(Error::ModulusTooNarrow);
        }
        let neg_threshold = plain_modulus.half_round_up();
        Ok(Self {
            plain_modulus,
            neg_threshold,
            base,
        })
    }

    #[inline]
    pub fn plain_modulus(&self) -> &BigUInt {
        &self.plain_modulus
    }

    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Stores one signed digit at the given coefficient.
    pub(crate) fn set_digit(
        &self,
        poly: &mut BigPoly,
        index: usize,
        digit: i64,
    ) -> Result<(), Error> {
        if digit == 0 {
            return Ok(());
        }
        let mut coeff = poly.coeff_mut(index).map_err(|_| Error::EncodingOverflow)?;
        if digit > 0 {
            coeff.set_u64(digit as u64).map_err(|_| Error::EncodingOverflow)
        } else {
            let complement = self
                .plain_modulus
                .checked_sub_u64(digit.unsigned_abs())
                .ok_or(Error::EncodingOverflow)?;
            coeff
                .set_big_uint(&complement)
                .map_err(|_| Error::EncodingOverflow)
        }
    }

    /// Zero encodes to the empty polynomial.
    pub fn encode_u64(&self, value: u64) -> Result<BigPoly, Error> {
        let digits = balanced_digits(value, self.base);
        let mut poly = BigPoly::new(
            digits.len(),
            self.plain_modulus.significant_bit_count(),
        );
        for (i, &digit) in digits.iter().enumerate() {
            self.set_digit(&mut poly, i, digit)?;
        }
        Ok(poly)
    }

    /// Negative values flip every digit sign.
    pub fn encode_i64(&self, value: i64) -> Result<BigPoly, Error> {
        if value >= 0 {
            return self.encode_u64(value as u64);
        }
        let digits = balanced_digits(value.unsigned_abs(), self.base);
        let mut poly = BigPoly::new(
            digits.len(),
            self.plain_modulus.significant_bit_count(),
        );
        for (i, &digit) in digits.iter().enumerate() {
            self.set_digit(&mut poly, i, -digit)?;
        }
        Ok(poly)
    }

    pub fn decode_u64(&self, poly: &BigPoly) -> Result<u64, Error> {
        decode_unsigned(poly, self.base, &self.plain_modulus, &self.neg_threshold)
    }

    pub fn decode_u32(&self, poly: &BigPoly) -> Result<u32, Error> {
        u32::try_from(self.decode_u64(poly)?).map_err(|_| Error::DecodeOutOfRange)
    }

    pub fn decode_i64(&self, poly: &BigPoly) -> Result<i64, Error> {
        decode_signed(poly, self.base, &self.plain_modulus, &self.neg_threshold)
    }

    pub fn decode_i32(&self, poly: &BigPoly) -> Result<i32, Error> {
        i32::try_from(self.decode_i64(poly)?).map_err(|_| Error::DecodeOutOfRange)
    }

    pub(crate) fn decode_coeff_i64(&self, coeff: &CoeffView<'_>) -> Result<i64, Error> {
        let (magnitude, negative) =
            signed_coeff(&self.plain_modulus, &self.neg_threshold, coeff)?;
        let magnitude = i64::try_from(magnitude).map_err(|_| Error::DecodeOutOfRange)?;
        Ok(if negative { -magnitude } else { magnitude })
    }
}
