use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use arith::{ReaderFrom, WriterTo};

use crate::{Error, MAX_MODULUS_BITS};

/// Modulus of at most 62 bits with its Barrett reduction constants.
///
/// The constant ratio is `floor(2^128 / value)` split into two 64-bit words,
/// followed by the division remainder. It is derived from the value on every
/// construction and load, never set independently. A zero value means unset;
/// reducing by an unset modulus is a caller error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SmallModulus {
    value: u64,
    const_ratio: [u64; 3],
    bit_count: usize,
}

fn const_ratio(value: u64) -> [u64; 3] {
    if value == 0 {
        return [0; 3];
    }
    // 2^128 = (u128::MAX / v) * v + (u128::MAX % v) + 1.
    let quotient = u128::MAX / value as u128;
    let remainder = (u128::MAX % value as u128) as u64;
    let (quotient, remainder) = if remainder + 1 == value {
        (quotient + 1, 0)
    } else {
        (quotient, remainder + 1)
    };
    [quotient as u64, (quotient >> 64) as u64, remainder]
}

impl SmallModulus {
    /// Accepts 0 or any value in `[2, 2^62)`.
    pub fn new(value: u64) -> Result<Self, Error> {
        if value == 1 || value >> MAX_MODULUS_BITS != 0 {
            return Err(Error::ValueOutOfRange(value));
        }
        Ok(Self {
            value,
            const_ratio: const_ratio(value),
            bit_count: (64 - value.leading_zeros()) as usize,
        })
    }

    /// Same range as [`new`](Self::new), value given as hex text.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let value = u64::from_str_radix(hex, 16).map_err(|_| Error::Format)?;
        Self::new(value)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// `[floor(2^128/value) low, high, 2^128 mod value]`; all zero when unset.
    #[inline]
    pub fn const_ratio(&self) -> &[u64; 3] {
        &self.const_ratio
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Barrett reduction of a full word.
    #[inline]
    pub fn reduce(&self, input: u64) -> u64 {
        debug_assert!(self.value != 0);
        let estimate = ((input as u128 * self.const_ratio[1] as u128) >> 64) as u64;
        let reduced = input.wrapping_sub(estimate.wrapping_mul(self.value));
        if reduced >= self.value {
            reduced - self.value
        } else {
            reduced
        }
    }

    /// Barrett reduction of a 128-bit input using both ratio words.
    pub fn reduce_u128(&self, input: u128) -> u64 {
        debug_assert!(self.value != 0);
        let x0 = input as u64;
        let x1 = (input >> 64) as u64;
        let [r0, r1, _] = self.const_ratio;

        // Low word of floor(input * floor(2^128/value) / 2^128). The estimate
        // is off by at most one multiple of the modulus.
        let carry = ((x0 as u128 * r0 as u128) >> 64) as u64;
        let prod = x0 as u128 * r1 as u128;
        let mid = prod as u64 as u128 + carry as u128;
        let high = ((prod >> 64) as u64).wrapping_add((mid >> 64) as u64);
        let prod = x1 as u128 * r0 as u128;
        let mid = (mid as u64 as u128) + (prod as u64 as u128);
        let carry = ((prod >> 64) as u64).wrapping_add((mid >> 64) as u64);
        let estimate = x1
            .wrapping_mul(r1)
            .wrapping_add(high)
            .wrapping_add(carry);

        let reduced = x0.wrapping_sub(estimate.wrapping_mul(self.value));
        if reduced >= self.value {
            reduced - self.value
        } else {
            reduced
        }
    }
}

impl TryFrom<u64> for SmallModulus {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Error> {
        Self::new(value)
    }
}

impl WriterTo for SmallModulus {
    /// Persists the value only; the constants are recomputed on load.
    fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.value)
    }
}

impl ReaderFrom for SmallModulus {
    fn read_from<R: std::io::Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let value = reader.read_u64::<LittleEndian>()?;
        *self = SmallModulus::new(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(())
    }
}
