use arith::{BigPoly, BigUInt};

use crate::integer::{balanced_digits, BalancedEncoder, BinaryEncoder};
use crate::Error;

/// The integer part of `value` as an i64, or the overflow error when the
/// double cannot name one.
fn integer_part(value: f64) -> Result<i64, Error> {
    if !value.is_finite() || value <= i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(Error::EncodingOverflow);
    }
    Ok(value as i64)
}

/// Copies the low `count` coefficients of `poly` into a standalone
/// polynomial for the integer decoder.
fn low_block(poly: &BigPoly, count: usize) -> Result<BigPoly, Error> {
    let mut block = BigPoly::new(count, poly.coeff_bit_count().max(1));
    for i in 0..count.min(poly.coeff_count()) {
        let coeff = poly.coeff(i).map_err(|_| Error::DecodeOutOfRange)?;
        block
            .coeff_mut(i)
            .and_then(|mut c| c.set_big_uint(&coeff.to_big_uint()))
            .map_err(|_| Error::DecodeOutOfRange)?;
    }
    Ok(block)
}

/// Double-to-polynomial encoder over a base-2 integer block and a negated
/// base-2 fraction block.
///
/// Coefficients `0..k1` hold the truncated integer part as the plain
/// [`BinaryEncoder`] would write it; fraction digit i (most significant
/// first) is stored negated at degree `n - 1 - i`. Evaluating the
/// polynomial at `x = 2` with `x^n = -1` therefore recovers
/// `integer + fraction`.
#[derive(Clone, Debug)]
pub struct BinaryFractionalEncoder {
    encoder: BinaryEncoder,
    poly_degree: usize,
    integer_coeff_count: usize,
    fraction_coeff_count: usize,
}

impl BinaryFractionalEncoder {
    /// `poly_degree` is the n of the ambient `x^n + 1`; the blocks must
    /// satisfy k1 >= 1, k2 >= 1, k1 + k2 <= n.
    pub fn new(
        plain_modulus: BigUInt,
        poly_degree: usize,
        integer_coeff_count: usize,
        fraction_coeff_count: usize,
    ) -> Result<Self, Error> {
        if integer_coeff_count == 0
            || fraction_coeff_count == 0
            || integer_coeff_count + fraction_coeff_count > poly_degree
        {
            return Err(Error::InvalidBlockSplit);
        }
        Ok(Self {
            encoder: BinaryEncoder::new(plain_modulus)?,
            poly_degree,
            integer_coeff_count,
            fraction_coeff_count,
        })
    }

    pub fn encode(&self, value: f64) -> Result<BigPoly, Error> {
        let int = integer_part(value)?;
        let required = 64 - int.unsigned_abs().leading_zeros() as usize;
        if required > self.integer_coeff_count {
            return Err(Error::EncodingOverflow);
        }
        let mut fraction = value - int as f64;

        let encoded_int = self.encoder.encode_i64(int)?;
        let width = self
            .encoder
            .plain_modulus()
            .significant_bit_count()
            .max(encoded_int.coeff_bit_count());
        let mut result = BigPoly::new(self.poly_degree, width);
        for i in 0..encoded_int.coeff_count() {
            let coeff = encoded_int.coeff(i).map_err(|_| Error::EncodingOverflow)?;
            result
                .coeff_mut(i)
                .and_then(|mut c| c.set_big_uint(&coeff.to_big_uint()))
                .map_err(|_| Error::EncodingOverflow)?;
        }

        for i in 0..self.fraction_coeff_count {
            fraction *= 2.0;
            let digit = fraction as i64;
            fraction -= digit as f64;
            self.set_negated_digit(&mut result, self.poly_degree - 1 - i, digit)?;
        }
        Ok(result)
    }

    /// Stores `-digit` mod M at the given degree; digits here are -1, 0 or 1.
    fn set_negated_digit(
        &self,
        poly: &mut BigPoly,
        degree: usize,
        digit: i64,
    ) -> Result<(), Error> {
        if digit == 0 {
            return Ok(());
        }
        let value = if digit > 0 {
            self.encoder
                .plain_modulus()
                .checked_sub_u64(digit as u64)
                .ok_or(Error::EncodingOverflow)?
        } else {
            BigUInt::from(digit.unsigned_abs())
        };
        poly.coeff_mut(degree)
            .and_then(|mut c| c.set_big_uint(&value))
            .map_err(|_| Error::EncodingOverflow)
    }

    pub fn decode(&self, poly: &BigPoly) -> Result<f64, Error> {
        if poly.significant_coeff_count() > self.poly_degree {
            return Err(Error::DecodeOutOfRange);
        }
        let int_block = low_block(poly, self.integer_coeff_count)?;
        let int = self.encoder.decode_i64(&int_block)?;

        let mut fraction = 0.0f64;
        let first_degree = self.poly_degree - self.fraction_coeff_count;
        for i in 0..self.fraction_coeff_count {
            let degree = first_degree + i;
            if degree < poly.coeff_count() {
                let coeff = poly.coeff(degree).map_err(|_| Error::DecodeOutOfRange)?;
                fraction += self.encoder.decode_coeff_i64(&coeff)? as f64;
            }
            fraction /= 2.0;
        }
        Ok(int as f64 - fraction)
    }
}

/// Balanced-base counterpart of [`BinaryFractionalEncoder`]: the integer
/// part is rounded to nearest and fraction digits are rounded half toward
/// zero, keeping the running remainder inside `[-1/2, 1/2]`.
#[derive(Clone, Debug)]
pub struct BalancedFractionalEncoder {
    encoder: BalancedEncoder,
    poly_degree: usize,
    integer_coeff_count: usize,
    fraction_coeff_count: usize,
}

impl BalancedFractionalEncoder {
    pub fn new(
        plain_modulus: BigUInt,
        poly_degree: usize,
        integer_coeff_count: usize,
        fraction_coeff_count: usize,
        base: u64,
    ) -> Result<Self, Error> {
        if integer_coeff_count == 0
            || fraction_coeff_count == 0
            || integer_coeff_count + fraction_coeff_count > poly_degree
        {
            return Err(Error::InvalidBlockSplit);
        }
        Ok(Self {
            encoder: BalancedEncoder::new(plain_modulus, base)?,
            poly_degree,
            integer_coeff_count,
            fraction_coeff_count,
        })
    }

    pub fn encode(&self, value: f64) -> Result<BigPoly, Error> {
        let int = integer_part(value.round())?;
        if balanced_digits(int.unsigned_abs(), self.encoder.base()).len()
            > self.integer_coeff_count
        {
            return Err(Error::EncodingOverflow);
        }
        let mut fraction = value - int as f64;

        let encoded_int = self.encoder.encode_i64(int)?;
        let mut result = BigPoly::new(
            self.poly_degree,
            self.encoder.plain_modulus().significant_bit_count(),
        );
        for i in 0..encoded_int.coeff_count() {
            let coeff = encoded_int.coeff(i).map_err(|_| Error::EncodingOverflow)?;
            result
                .coeff_mut(i)
                .and_then(|mut c| c.set_big_uint(&coeff.to_big_uint()))
                .map_err(|_| Error::EncodingOverflow)?;
        }

        for i in 0..self.fraction_coeff_count {
            fraction *= self.encoder.base() as f64;
            // Round half toward zero so the remainder stays in [-1/2, 1/2].
            let digit = (fraction.signum() * (fraction.abs() - 0.5).ceil()) as i64;
            fraction -= digit as f64;
            self.encoder
                .set_digit(&mut result, self.poly_degree - 1 - i, -digit)?;
        }
        Ok(result)
    }

    pub fn decode(&self, poly: &BigPoly) -> Result<f64, Error> {
        if poly.significant_coeff_count() > self.poly_degree {
            return Err(Error::DecodeOutOfRange);
        }
        let int_block = low_block(poly, self.integer_coeff_count)?;
        let int = self.encoder.decode_i64(&int_block)?;

        let mut fraction = 0.0f64;
        let first_degree = self.poly_degree - self.fraction_coeff_count;
        for i in 0..self.fraction_coeff_count {
            let degree = first_degree + i;
            if degree < poly.coeff_count() {
                let coeff = poly.coeff(degree).map_err(|_| Error::DecodeOutOfRange)?;
                fraction += self.encoder.decode_coeff_i64(&coeff)? as f64;
            }
            fraction /= self.encoder.base() as f64;
        }
        Ok(int as f64 - fraction)
    }
}
