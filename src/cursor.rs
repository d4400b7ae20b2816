/*!
Provides [ByteCursor], a bounds-checked reader over a byte slice.

Unlike an [`std::io::Read`] extension trait (the shape the teacher uses in
`parser/utils.rs`), every read here is checked against an explicit residual
length rather than relying on the underlying reader's own EOF behavior —
the wire format this crate parses is adversarial and length-delimited, so
the cursor is the single place bounds are enforced.
*/
use crate::error::ParserError;

/// A bounds-checked, big-endian reader over a `&[u8]`.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Current read offset from the start of the slice.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn advance(&mut self, n: usize, ctx: &'static str) -> Result<usize, ParserError> {
        if self.offset + n > self.data.len() {
            return Err(ParserError::Truncated(ctx));
        }
        let start = self.offset;
        self.offset += n;
        Ok(start)
    }

    pub fn read_u8(&mut self) -> Result<u8, ParserError> {
        let start = self.advance(1, "u8")?;
        Ok(self.data[start])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParserError> {
        let start = self.advance(2, "u16")?;
        Ok(u16::from_be_bytes(self.data[start..start + 2].try_into().unwrap()))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParserError> {
        let start = self.advance(4, "u32")?;
        Ok(u32::from_be_bytes(self.data[start..start + 4].try_into().unwrap()))
    }

    /// Read exactly `n` bytes and return a borrowed slice.
    pub fn read_n(&mut self, n: usize) -> Result<&'a [u8], ParserError> {
        let start = self.advance(n, "n_bytes")?;
        Ok(&self.data[start..start + n])
    }

    /// Skip `n` bytes without inspecting them.
    pub fn skip(&mut self, n: usize) -> Result<(), ParserError> {
        self.advance(n, "skip")?;
        Ok(())
    }
}
