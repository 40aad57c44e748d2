//! Little-endian limb-slice primitives shared by `BigUInt` and `BigPoly`.

use std::cmp::Ordering;

use crate::Error;

pub(crate) const BITS_PER_LIMB: usize = 64;
pub(crate) const NIBBLES_PER_LIMB: usize = BITS_PER_LIMB / 4;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[inline(always)]
pub(crate) fn limbs_for_bits(bit_count: usize) -> usize {
    bit_count.div_ceil(BITS_PER_LIMB)
}

pub(crate) fn significant_bits(limbs: &[u64]) -> usize {
    for (i, &word) in limbs.iter().enumerate().rev() {
        if word != 0 {
            return i * BITS_PER_LIMB + (BITS_PER_LIMB - word.leading_zeros() as usize);
        }
    }
    0
}

#[inline]
pub(crate) fn is_zero(limbs: &[u64]) -> bool {
    limbs.iter().all(|&word| word == 0)
}

/// Clears every bit at position >= `bit_count`.
pub(crate) fn mask_high_bits(limbs: &mut [u64], bit_count: usize) {
    let words = limbs_for_bits(bit_count);
    for word in limbs.iter_mut().skip(words) {
        *word = 0;
    }
    let rem = bit_count % BITS_PER_LIMB;
    if rem != 0 && words <= limbs.len() {
        limbs[words - 1] &= (1u64 << rem) - 1;
    }
}

/// Value comparison of slices of possibly different lengths.
pub(crate) fn cmp(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in (0..len).rev() {
        let wa = a.get(i).copied().unwrap_or(0);
        let wb = b.get(i).copied().unwrap_or(0);
        match wa.cmp(&wb) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// `out = a - b`, all slices `out.len()` long (`b` may be shorter).
/// Returns the final borrow.
pub(crate) fn sub(a: &[u64], b: &[u64], out: &mut [u64]) -> bool {
    debug_assert!(a.len() == out.len());
    let mut borrow = false;
    for i in 0..out.len() {
        let wb = b.get(i).copied().unwrap_or(0);
        let (diff, b1) = a[i].overflowing_sub(wb);
        let (diff, b2) = diff.overflowing_sub(borrow as u64);
        out[i] = diff;
        borrow = b1 || b2;
    }
    borrow
}

#[inline]
fn hex_to_nibble(ch: char) -> Option<u64> {
    ch.to_digit(16).map(u64::from)
}

/// Significant-bit count of a hex string, validating every character.
/// Leading zeros are permitted and do not contribute.
pub(crate) fn hex_bit_count(hex: &str) -> Result<usize, Error> {
    let mut first_significant = None;
    for (i, ch) in hex.chars().enumerate() {
        let nibble = hex_to_nibble(ch).ok_or(Error::Format("invalid hex digit"))?;
        if nibble != 0 && first_significant.is_none() {
            first_significant = Some((i, nibble));
        }
    }
    match first_significant {
        Some((i, nibble)) => {
            let nibble_bits = BITS_PER_LIMB - nibble.leading_zeros() as usize;
            Ok((hex.len() - i - 1) * 4 + nibble_bits)
        }
        None => Ok(0),
    }
}

/// Fills `limbs` from a hex string, low nibbles from the right.
/// The caller must have sized `limbs` for [`hex_bit_count`].
pub(crate) fn hex_to_limbs(hex: &str, limbs: &mut [u64]) -> Result<(), Error> {
    limbs.fill(0);
    for (i, ch) in hex.chars().rev().enumerate() {
        let nibble = hex_to_nibble(ch).ok_or(Error::Format("invalid hex digit"))?;
        if nibble != 0 {
            debug_assert!(i / NIBBLES_PER_LIMB < limbs.len());
            limbs[i / NIBBLES_PER_LIMB] |= nibble << (4 * (i % NIBBLES_PER_LIMB));
        }
    }
    Ok(())
}

/// Uppercase hex rendering with leading zeros stripped; `"0"` for zero.
pub(crate) fn to_hex(limbs: &[u64]) -> String {
    let sig = significant_bits(limbs);
    if sig == 0 {
        return String::from("0");
    }
    let nibbles = sig.div_ceil(4);
    let mut out = String::with_capacity(nibbles);
    for i in (0..nibbles).rev() {
        let nibble = (limbs[i / NIBBLES_PER_LIMB] >> (4 * (i % NIBBLES_PER_LIMB))) & 0xF;
        out.push(HEX_DIGITS[nibble as usize] as char);
    }
    out
}
