//! Exact fixed-width integers and polynomials.
//!
//! `BigUInt` is a resizable unsigned integer with a declared bit-width
//! capacity; `BigPoly` is a sequence of uniform-width coefficients stored in
//! one contiguous limb buffer, with borrowing coefficient views. Both print
//! and parse an uppercase-hex text form and persist through the
//! [`WriterTo`]/[`ReaderFrom`] stream traits.

mod big_poly;
mod big_uint;
mod limbs;
mod serialization;

pub use big_poly::{BigPoly, CoeffView, CoeffViewMut};
pub use big_uint::BigUInt;
pub use serialization::{ReaderFrom, WriterTo};

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Text input contained something other than the documented grammar.
    #[error("malformed text input: {0}")]
    Format(&'static str),
    /// Byte or coefficient index beyond the declared size.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    /// A value was assigned into a fixed-width slot it does not fit.
    #[error("value of {required} significant bits does not fit in {capacity} bits")]
    ValueTooWide { required: usize, capacity: usize },
}
