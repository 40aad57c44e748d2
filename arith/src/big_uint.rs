use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::limbs::{self, BITS_PER_LIMB};
use crate::serialization::{ReaderFrom, WriterTo};
use crate::Error;

/// Unsigned integer with an explicit bit-width capacity.
///
/// The stored value always fits the declared width: every mutation path
/// masks bits at positions >= `bit_count`. A zero-width instance owns no
/// limbs and is the canonical zero; it compares equal to a zero of any
/// width. Shrinking [`resize`](Self::resize) truncates silently.
#[derive(Clone, Debug, Default)]
pub struct BigUInt {
    pub(crate) limbs: Vec<u64>,
    pub(crate) bit_count: usize,
}

impl BigUInt {
    /// Zero value of the given capacity (0 allocates nothing).
    pub fn new(bit_count: usize) -> Self {
        Self {
            limbs: vec![0; limbs::limbs_for_bits(bit_count)],
            bit_count,
        }
    }

    /// Value of the given capacity; the value is truncated to the capacity.
    pub fn from_u64(bit_count: usize, value: u64) -> Self {
        let mut out = Self::new(bit_count);
        out.set_u64(value);
        if out.bit_count != bit_count {
            out.resize(bit_count);
        }
        out
    }

    /// Parses uppercase or lowercase hex; capacity = significant bits.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let mut out = Self::new(0);
        out.set_hex(hex)?;
        Ok(out)
    }

    /// Parses hex into the given capacity, truncating if it does not fit.
    pub fn from_hex_sized(bit_count: usize, hex: &str) -> Result<Self, Error> {
        let mut out = Self::new(bit_count);
        out.set_hex(hex)?;
        if out.bit_count != bit_count {
            out.resize(bit_count);
        }
        Ok(out)
    }

    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[inline]
    pub fn u64_count(&self) -> usize {
        self.limbs.len()
    }

    #[inline]
    pub fn byte_count(&self) -> usize {
        self.bit_count.div_ceil(8)
    }

    #[inline]
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    pub fn significant_bit_count(&self) -> usize {
        limbs::significant_bits(&self.limbs)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.limbs)
    }

    /// Changes the capacity: grows with zero fill, shrinks by discarding
    /// high bits. Idempotent; resizing to 0 releases storage.
    pub fn resize(&mut self, bit_count: usize) {
        if bit_count == self.bit_count {
            return;
        }
        self.limbs.resize(limbs::limbs_for_bits(bit_count), 0);
        self.bit_count = bit_count;
        limbs::mask_high_bits(&mut self.limbs, bit_count);
    }

    pub fn set_zero(&mut self) {
        self.limbs.fill(0);
    }

    /// Assigns a machine word, growing the capacity if it does not fit.
    pub fn set_u64(&mut self, value: u64) {
        let sig = BITS_PER_LIMB - value.leading_zeros() as usize;
        if sig > self.bit_count {
            self.resize(sig);
        }
        self.set_zero();
        if let Some(first) = self.limbs.first_mut() {
            *first = value;
        }
    }

    /// Assigns another value, growing the capacity to its significant bits
    /// if needed. Never shrinks.
    pub fn set(&mut self, assign: &BigUInt) {
        let sig = assign.significant_bit_count();
        if sig > self.bit_count {
            self.resize(sig);
        }
        let words = limbs::limbs_for_bits(sig);
        for i in 0..self.limbs.len() {
            self.limbs[i] = if i < words { assign.limbs[i] } else { 0 };
        }
    }

    /// Assigns from hex text, growing the capacity if needed.
    /// Leading zeros are accepted; any non-hex character is a format error.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), Error> {
        let bits = limbs::hex_bit_count(hex)?;
        if bits > self.bit_count {
            self.resize(bits);
        }
        limbs::hex_to_limbs(hex, &mut self.limbs)?;
        Ok(())
    }

    /// Little-endian byte read; errors beyond [`byte_count`](Self::byte_count).
    pub fn byte(&self, index: usize) -> Result<u8, Error> {
        if index >= self.byte_count() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.byte_count(),
            });
        }
        Ok((self.limbs[index / 8] >> (8 * (index % 8))) as u8)
    }

    /// Little-endian byte write; bits beyond the capacity stay masked.
    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<(), Error> {
        if index >= self.byte_count() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.byte_count(),
            });
        }
        let shift = 8 * (index % 8);
        let word = &mut self.limbs[index / 8];
        *word = (*word & !(0xFFu64 << shift)) | ((value as u64) << shift);
        limbs::mask_high_bits(&mut self.limbs, self.bit_count);
        Ok(())
    }

    /// The value as a machine word, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.significant_bit_count() > BITS_PER_LIMB {
            return None;
        }
        Some(self.limbs.first().copied().unwrap_or(0))
    }

    /// `self - other` at `self`'s capacity; `None` if `other` is larger.
    pub fn checked_sub(&self, other: &BigUInt) -> Option<BigUInt> {
        if limbs::cmp(&other.limbs, &self.limbs) == Ordering::Greater {
            return None;
        }
        let mut out = BigUInt::new(self.bit_count);
        limbs::sub(&self.limbs, &other.limbs, &mut out.limbs);
        Some(out)
    }

    pub fn checked_sub_u64(&self, value: u64) -> Option<BigUInt> {
        self.checked_sub(&BigUInt::from(value))
    }

    /// `ceil(self / 2)` at `self`'s capacity.
    pub fn half_round_up(&self) -> BigUInt {
        let mut out = BigUInt::new(self.bit_count);
        let odd = self.limbs.first().copied().unwrap_or(0) & 1;
        let mut carry_in = 0u64;
        for (i, &word) in self.limbs.iter().enumerate().rev() {
            out.limbs[i] = (word >> 1) | (carry_in << (BITS_PER_LIMB - 1));
            carry_in = word & 1;
        }
        if odd != 0 {
            // floor(v/2) + 1; cannot carry out of the capacity.
            for word in out.limbs.iter_mut() {
                let (sum, carry) = word.overflowing_add(1);
                *word = sum;
                if !carry {
                    break;
                }
            }
        }
        out
    }

    /// `self * multiplier`, sized to the exact significant bits of the product.
    pub fn mul_u64(&self, multiplier: u64) -> BigUInt {
        let mut product = vec![0u64; self.limbs.len() + 1];
        let mut carry = 0u128;
        for (i, &word) in self.limbs.iter().enumerate() {
            let t = word as u128 * multiplier as u128 + carry;
            product[i] = t as u64;
            carry = t >> 64;
        }
        product[self.limbs.len()] = carry as u64;
        let bits = limbs::significant_bits(&product);
        product.truncate(limbs::limbs_for_bits(bits));
        BigUInt {
            limbs: product,
            bit_count: bits,
        }
    }
}

impl From<u64> for BigUInt {
    /// Capacity = significant bits of the value.
    fn from(value: u64) -> Self {
        let mut out = BigUInt::new(0);
        out.set_u64(value);
        out
    }
}

impl PartialEq for BigUInt {
    fn eq(&self, other: &Self) -> bool {
        limbs::cmp(&self.limbs, &other.limbs) == Ordering::Equal
    }
}

impl Eq for BigUInt {}

impl PartialOrd for BigUInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigUInt {
    fn cmp(&self, other: &Self) -> Ordering {
        limbs::cmp(&self.limbs, &other.limbs)
    }
}

impl Hash for BigUInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Only significant limbs, so equal values of different widths agree.
        let words = limbs::limbs_for_bits(self.significant_bit_count());
        self.limbs[..words].hash(state);
    }
}

impl fmt::Display for BigUInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&limbs::to_hex(&self.limbs))
    }
}

impl WriterTo for BigUInt {
    fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.bit_count as u64)?;
        for &word in &self.limbs {
            writer.write_u64::<LittleEndian>(word)?;
        }
        Ok(())
    }
}

impl ReaderFrom for BigUInt {
    fn read_from<R: std::io::Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let read_bit_count = reader.read_u64::<LittleEndian>()? as usize;
        if read_bit_count > self.bit_count {
            self.resize(read_bit_count);
        }
        let read_words = crate::limbs::limbs_for_bits(read_bit_count);
        for i in 0..self.limbs.len() {
            self.limbs[i] = if i < read_words {
                reader.read_u64::<LittleEndian>()?
            } else {
                0
            };
        }
        limbs::mask_high_bits(&mut self.limbs, self.bit_count);
        Ok(())
    }
}
