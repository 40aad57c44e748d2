use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use arith::{BigPoly, ReaderFrom, WriterTo};
use modulus::SmallModulus;

/// Standard deviation of the noise distribution unless overridden.
pub const DEFAULT_NOISE_STANDARD_DEVIATION: f64 = 3.19;

/// The noise distribution is truncated at this multiple of the deviation.
pub const NOISE_DISTRIBUTION_WIDTH_MULTIPLIER: f64 = 6.0;

/// The inputs to qualification: a polynomial modulus, a chain of coefficient
/// moduli, a plaintext modulus, noise widths and a decomposition bit count.
///
/// Setters record values without judging them; [`validate`](crate::validate)
/// is where semantic checks happen. The maximum noise deviation follows the
/// standard deviation at a fixed multiplier and is not set directly.
#[derive(Clone, Debug, PartialEq)]
pub struct EncryptionParameters {
    poly_modulus: BigPoly,
    coeff_modulus: Vec<SmallModulus>,
    plain_modulus: SmallModulus,
    noise_standard_deviation: f64,
    noise_max_deviation: f64,
    decomposition_bit_count: usize,
}

impl Default for EncryptionParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionParameters {
    pub fn new() -> Self {
        Self {
            poly_modulus: BigPoly::default(),
            coeff_modulus: Vec::new(),
            plain_modulus: SmallModulus::default(),
            noise_standard_deviation: DEFAULT_NOISE_STANDARD_DEVIATION,
            noise_max_deviation: NOISE_DISTRIBUTION_WIDTH_MULTIPLIER
                * DEFAULT_NOISE_STANDARD_DEVIATION,
            decomposition_bit_count: 0,
        }
    }

    #[inline]
    pub fn poly_modulus(&self) -> &BigPoly {
        &self.poly_modulus
    }

    pub fn set_poly_modulus(&mut self, poly_modulus: BigPoly) {
        self.poly_modulus = poly_modulus;
    }

    /// Accepts the `"1x^4 + 1"` term-list form.
    pub fn set_poly_modulus_text(&mut self, text: &str) -> Result<(), arith::Error> {
        self.poly_modulus = BigPoly::from_text(text)?;
        Ok(())
    }

    #[inline]
    pub fn coeff_modulus(&self) -> &[SmallModulus] {
        &self.coeff_modulus
    }

    pub fn set_coeff_modulus(&mut self, coeff_modulus: Vec<SmallModulus>) {
        self.coeff_modulus = coeff_modulus;
    }

    #[inline]
    pub fn plain_modulus(&self) -> &SmallModulus {
        &self.plain_modulus
    }

    pub fn set_plain_modulus(&mut self, plain_modulus: SmallModulus) {
        self.plain_modulus = plain_modulus;
    }

    /// Convenience over [`SmallModulus::new`].
    pub fn set_plain_modulus_u64(&mut self, value: u64) -> Result<(), modulus::Error> {
        self.plain_modulus = SmallModulus::new(value)?;
        Ok(())
    }

    #[inline]
    pub fn noise_standard_deviation(&self) -> f64 {
        self.noise_standard_deviation
    }

    #[inline]
    pub fn noise_max_deviation(&self) -> f64 {
        self.noise_max_deviation
    }

    /// Also moves the maximum deviation to the fixed multiple of the new
    /// standard deviation.
    pub fn set_noise_standard_deviation(&mut self, noise_standard_deviation: f64) {
        self.noise_standard_deviation = noise_standard_deviation;
        self.noise_max_deviation =
            NOISE_DISTRIBUTION_WIDTH_MULTIPLIER * noise_standard_deviation;
    }

    #[inline]
    pub fn decomposition_bit_count(&self) -> usize {
        self.decomposition_bit_count
    }

    /// Zero disables relinearization key support entirely.
    pub fn set_decomposition_bit_count(&mut self, decomposition_bit_count: usize) {
        self.decomposition_bit_count = decomposition_bit_count;
    }
}

impl WriterTo for EncryptionParameters {
    fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.poly_modulus.write_to(writer)?;
        writer.write_u64::<LittleEndian>(self.coeff_modulus.len() as u64)?;
        for m in &self.coeff_modulus {
            m.write_to(writer)?;
        }
        self.plain_modulus.write_to(writer)?;
        writer.write_u64::<LittleEndian>(self.noise_standard_deviation.to_bits())?;
        writer.write_u64::<LittleEndian>(self.noise_max_deviation.to_bits())?;
        writer.write_u64::<LittleEndian>(self.decomposition_bit_count as u64)
    }
}

impl ReaderFrom for EncryptionParameters {
    fn read_from<R: std::io::Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let mut poly_modulus = BigPoly::default();
        poly_modulus.read_from(reader)?;
        let count = reader.read_u64::<LittleEndian>()? as usize;
        let mut coeff_modulus = Vec::with_capacity(count);
        for _ in 0..count {
            let mut m = SmallModulus::default();
            m.read_from(reader)?;
            coeff_modulus.push(m);
        }
        let mut plain_modulus = SmallModulus::default();
        plain_modulus.read_from(reader)?;
        self.poly_modulus = poly_modulus;
        self.coeff_modulus = coeff_modulus;
        self.plain_modulus = plain_modulus;
        self.noise_standard_deviation =
            f64::from_bits(reader.read_u64::<LittleEndian>()?);
        self.noise_max_deviation = f64::from_bits(reader.read_u64::<LittleEndian>()?);
        self.decomposition_bit_count = reader.read_u64::<LittleEndian>()? as usize;
        Ok(())
    }
}
