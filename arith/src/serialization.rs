use std::io::{Read, Result, Write};

/// Writes the receiver to a byte stream in its stable binary framing.
pub trait WriterTo {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;
}

/// Restores the receiver from a byte stream produced by [`WriterTo`].
pub trait ReaderFrom {
    fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<()>;
}
