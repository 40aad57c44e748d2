use std::fmt;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use itertools::izip;

use crate::big_uint::BigUInt;
use crate::limbs::{self, BITS_PER_LIMB};
use crate::serialization::{ReaderFrom, WriterTo};
use crate::Error;

/// Polynomial with a fixed number of uniform-width unsigned coefficients.
///
/// All coefficients live in one contiguous limb buffer; [`coeff`](Self::coeff)
/// and [`coeff_mut`](Self::coeff_mut) hand out borrowing views over the slice
/// that backs one coefficient. The text form lists nonzero terms from the
/// highest degree down, e.g. `1x^2 + Ax^1 + 3`; the zero polynomial prints
/// `0`.
#[derive(Clone, Debug, Default)]
pub struct BigPoly {
    pub(crate) data: Vec<u64>,
    pub(crate) coeff_count: usize,
    pub(crate) coeff_bit_count: usize,
}

impl BigPoly {
    /// Zero polynomial of the given shape.
    pub fn new(coeff_count: usize, coeff_bit_count: usize) -> Self {
        Self {
            data: vec![0; coeff_count * limbs::limbs_for_bits(coeff_bit_count)],
            coeff_count,
            coeff_bit_count,
        }
    }

    /// Parses the term-list text form at its minimal shape: coefficient count
    /// is one past the highest written degree, coefficient width the widest
    /// written value. All-zero input yields the (0, 0) polynomial.
    pub fn from_text(text: &str) -> Result<Self, Error> {
        let mut poly = Self::new(0, 0);
        poly.set_text(text)?;
        Ok(poly)
    }

    /// Parses into the given shape, growing it if the text does not fit.
    pub fn from_text_sized(
        coeff_count: usize,
        coeff_bit_count: usize,
        text: &str,
    ) -> Result<Self, Error> {
        let mut poly = Self::new(coeff_count, coeff_bit_count);
        poly.set_text(text)?;
        Ok(poly)
    }

    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.coeff_count
    }

    #[inline]
    pub fn coeff_bit_count(&self) -> usize {
        self.coeff_bit_count
    }

    #[inline]
    pub(crate) fn limbs_per_coeff(&self) -> usize {
        limbs::limbs_for_bits(self.coeff_bit_count)
    }

    /// Borrowing read view of one coefficient.
    pub fn coeff(&self, index: usize) -> Result<CoeffView<'_>, Error> {
        if index >= self.coeff_count {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.coeff_count,
            });
        }
        let stride = self.limbs_per_coeff();
        Ok(CoeffView {
            limbs: &self.data[index * stride..(index + 1) * stride],
            bit_count: self.coeff_bit_count,
        })
    }

    /// Borrowing write view of one coefficient.
    pub fn coeff_mut(&mut self, index: usize) -> Result<CoeffViewMut<'_>, Error> {
        if index >= self.coeff_count {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.coeff_count,
            });
        }
        let stride = self.limbs_per_coeff();
        let bit_count = self.coeff_bit_count;
        Ok(CoeffViewMut {
            limbs: &mut self.data[index * stride..(index + 1) * stride],
            bit_count,
        })
    }

    #[inline]
    fn coeff_limbs(&self, index: usize) -> &[u64] {
        let stride = self.limbs_per_coeff();
        &self.data[index * stride..(index + 1) * stride]
    }

    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.data)
    }

    pub fn set_zero(&mut self) {
        self.data.fill(0);
    }

    /// One past the highest nonzero coefficient; 0 for the zero polynomial.
    pub fn significant_coeff_count(&self) -> usize {
        (0..self.coeff_count)
            .rev()
            .find(|&i| !limbs::is_zero(self.coeff_limbs(i)))
            .map_or(0, |i| i + 1)
    }

    /// Widest significant-bit count over all coefficients.
    pub fn significant_coeff_bit_count(&self) -> usize {
        (0..self.coeff_count)
            .map(|i| limbs::significant_bits(self.coeff_limbs(i)))
            .max()
            .unwrap_or(0)
    }

    /// Reshapes the polynomial, keeping the first `min(old, new)` coefficient
    /// values. Narrowing the coefficient width discards high bits silently;
    /// extra coefficients on grow are zero.
    pub fn resize(&mut self, coeff_count: usize, coeff_bit_count: usize) {
        if coeff_count == self.coeff_count && coeff_bit_count == self.coeff_bit_count {
            return;
        }
        let old_stride = self.limbs_per_coeff();
        let new_stride = limbs::limbs_for_bits(coeff_bit_count);
        let keep = self.coeff_count.min(coeff_count);
        let mut data = vec![0u64; coeff_count * new_stride];
        for i in 0..keep {
            let src = &self.data[i * old_stride..(i + 1) * old_stride];
            let dst = &mut data[i * new_stride..(i + 1) * new_stride];
            let words = old_stride.min(new_stride);
            dst[..words].copy_from_slice(&src[..words]);
            limbs::mask_high_bits(dst, coeff_bit_count);
        }
        self.data = data;
        self.coeff_count = coeff_count;
        self.coeff_bit_count = coeff_bit_count;
    }

    /// Assigns another polynomial, growing the shape to its significant
    /// coefficient count and width if needed. Never shrinks.
    pub fn set(&mut self, assign: &BigPoly) {
        let sig_count = assign.significant_coeff_count();
        let sig_bits = assign.significant_coeff_bit_count();
        if sig_count > self.coeff_count || sig_bits > self.coeff_bit_count {
            self.resize(
                self.coeff_count.max(sig_count),
                self.coeff_bit_count.max(sig_bits),
            );
        }
        self.set_zero();
        let stride = self.limbs_per_coeff();
        let src_stride = assign.limbs_per_coeff();
        let words = stride.min(src_stride);
        for i in 0..sig_count {
            self.data[i * stride..i * stride + words]
                .copy_from_slice(&assign.data[i * src_stride..i * src_stride + words]);
        }
    }

    /// Assigns from the term-list text form, growing the shape if needed.
    /// All-zero text zeroes the value and leaves the shape untouched.
    pub fn set_text(&mut self, text: &str) -> Result<(), Error> {
        let terms = parse_terms(text)?;
        let needed_bits = terms
            .iter()
            .map(|term| term.coeff.significant_bit_count())
            .max()
            .unwrap_or(0);
        if needed_bits == 0 {
            self.set_zero();
            return Ok(());
        }
        let needed_count = terms.first().map_or(0, |term| term.degree + 1);
        if needed_count > self.coeff_count || needed_bits > self.coeff_bit_count {
            self.resize(
                self.coeff_count.max(needed_count),
                self.coeff_bit_count.max(needed_bits),
            );
        }
        self.set_zero();
        let stride = self.limbs_per_coeff();
        for term in &terms {
            let words = term.coeff.u64_count();
            self.data[term.degree * stride..term.degree * stride + words]
                .copy_from_slice(term.coeff.limbs());
        }
        Ok(())
    }
}

impl PartialEq for BigPoly {
    /// Value equality over significant coefficients; shapes may differ.
    fn eq(&self, other: &Self) -> bool {
        let sig = self.significant_coeff_count();
        if sig != other.significant_coeff_count() {
            return false;
        }
        izip!(
            (0..sig).map(|i| self.coeff_limbs(i)),
            (0..sig).map(|i| other.coeff_limbs(i))
        )
        .all(|(a, b)| limbs::cmp(a, b) == std::cmp::Ordering::Equal)
    }
}

impl Eq for BigPoly {}

impl fmt::Display for BigPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sig = self.significant_coeff_count();
        if sig == 0 {
            return f.write_str("0");
        }
        let mut first = true;
        for i in (0..sig).rev() {
            let word = self.coeff_limbs(i);
            if limbs::is_zero(word) {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            f.write_str(&limbs::to_hex(word))?;
            if i > 0 {
                write!(f, "x^{i}")?;
            }
        }
        Ok(())
    }
}

impl WriterTo for BigPoly {
    fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.coeff_count as u64)?;
        writer.write_u64::<LittleEndian>(self.coeff_bit_count as u64)?;
        for &word in &self.data {
            writer.write_u64::<LittleEndian>(word)?;
        }
        Ok(())
    }
}

impl ReaderFrom for BigPoly {
    fn read_from<R: std::io::Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let read_count = reader.read_u64::<LittleEndian>()? as usize;
        let read_bits = reader.read_u64::<LittleEndian>()? as usize;
        if read_count > self.coeff_count || read_bits > self.coeff_bit_count {
            self.resize(
                self.coeff_count.max(read_count),
                self.coeff_bit_count.max(read_bits),
            );
        }
        self.set_zero();
        let stride = self.limbs_per_coeff();
        let read_stride = limbs::limbs_for_bits(read_bits);
        for i in 0..read_count {
            for j in 0..read_stride {
                let word = reader.read_u64::<LittleEndian>()?;
                if j < stride {
                    self.data[i * stride + j] = word;
                }
            }
        }
        Ok(())
    }
}

/// Read view of one coefficient's limbs.
pub struct CoeffView<'a> {
    limbs: &'a [u64],
    bit_count: usize,
}

impl CoeffView<'_> {
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(self.limbs)
    }

    pub fn significant_bit_count(&self) -> usize {
        limbs::significant_bits(self.limbs)
    }

    /// The coefficient as a machine word, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if limbs::significant_bits(self.limbs) > BITS_PER_LIMB {
            return None;
        }
        Some(self.limbs.first().copied().unwrap_or(0))
    }

    /// The coefficient as an owned integer at the coefficient width.
    pub fn to_big_uint(&self) -> BigUInt {
        BigUInt {
            limbs: self.limbs.to_vec(),
            bit_count: self.bit_count,
        }
    }
}

impl fmt::Display for CoeffView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&limbs::to_hex(self.limbs))
    }
}

/// Write view of one coefficient's limbs. Views borrow fixed storage, so
/// assignment fails with [`Error::ValueTooWide`] instead of growing.
pub struct CoeffViewMut<'a> {
    limbs: &'a mut [u64],
    bit_count: usize,
}

impl CoeffViewMut<'_> {
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(self.limbs)
    }

    pub fn significant_bit_count(&self) -> usize {
        limbs::significant_bits(self.limbs)
    }

    /// The coefficient as a machine word, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if limbs::significant_bits(self.limbs) > BITS_PER_LIMB {
            return None;
        }
        Some(self.limbs.first().copied().unwrap_or(0))
    }

    pub fn set_zero(&mut self) {
        self.limbs.fill(0);
    }

    pub fn set_u64(&mut self, value: u64) -> Result<(), Error> {
        let required = BITS_PER_LIMB - value.leading_zeros() as usize;
        if required > self.bit_count {
            return Err(Error::ValueTooWide {
                required,
                capacity: self.bit_count,
            });
        }
        self.limbs.fill(0);
        if let Some(first) = self.limbs.first_mut() {
            *first = value;
        }
        Ok(())
    }

    pub fn set_big_uint(&mut self, value: &BigUInt) -> Result<(), Error> {
        let required = value.significant_bit_count();
        if required > self.bit_count {
            return Err(Error::ValueTooWide {
                required,
                capacity: self.bit_count,
            });
        }
        self.limbs.fill(0);
        let words = limbs::limbs_for_bits(required);
        self.limbs[..words].copy_from_slice(&value.limbs()[..words]);
        Ok(())
    }
}

struct Term {
    degree: usize,
    coeff: BigUInt,
}

/// Splits `HEX` / `HEXx^DEC` terms joined by `" + "`, requiring strictly
/// decreasing degrees. Zero-valued terms are kept: they take part in the
/// degree ordering check, and alongside nonzero terms their degree still
/// sizes the polynomial.
fn parse_terms(text: &str) -> Result<Vec<Term>, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::Format("empty polynomial text"));
    }
    let mut terms: Vec<Term> = Vec::new();
    let mut last_degree: Option<usize> = None;
    for part in trimmed.split(" + ") {
        let (hex, degree) = match part.split_once("x^") {
            Some((hex, exp)) => {
                let degree: usize = exp
                    .parse()
                    .map_err(|_| Error::Format("invalid term degree"))?;
                (hex, degree)
            }
            None => (part, 0),
        };
        if hex.is_empty() {
            return Err(Error::Format("term has no coefficient"));
        }
        if let Some(prev) = last_degree {
            if degree >= prev {
                return Err(Error::Format("term degrees must strictly decrease"));
            }
        }
        last_degree = Some(degree);
        let coeff = BigUInt::from_hex(hex)?;
        terms.push(Term { degree, coeff });
    }
    Ok(terms)
}
