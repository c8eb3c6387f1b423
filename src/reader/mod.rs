#![doc = r#"
The byte cursor that all decoding pulls from.

A [`Reader`] walks a borrowed byte slice forward one field at a time. The
only backwards movement it supports is [`Reader::push_back`], a single-byte
rewind used to undo the speculative status read that running-status
detection requires. Anything resembling a general-purpose seek is out of
contract.
"#]

mod error;
pub use error::*;

/// A forward-only cursor over a borrowed byte source.
///
/// Positions reported by [`Reader::buffer_position`] are absolute file
/// offsets, including for the length-scoped child cursors that decode
/// track chunk bodies.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
    /// Absolute offset of `bytes[0]` within the original source.
    base: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a byte slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            base: 0,
        }
    }

    /// The absolute offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.base + self.position
    }

    /// Bytes left before the cursor is exhausted.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> ReadResult<u8> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(ReaderError::end_of_data(self.base + self.position))?;
        self.position += 1;
        Ok(byte)
    }

    /// Read the next `n` bytes as a slice borrowed from the source.
    pub fn read_bytes(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ReaderError::end_of_data(self.base + self.bytes.len()))?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Rewind the cursor by exactly `count` bytes.
    ///
    /// Only meant to undo a just-completed speculative read; rewinding
    /// past the start of the buffer saturates at 0.
    pub fn push_back(&mut self, count: usize) {
        self.position = self.position.saturating_sub(count);
    }

    /// Split off a child reader over the next `len` bytes and advance this
    /// reader past them.
    ///
    /// The child is clamped to the bytes actually present, so a declared
    /// chunk length that overruns the source yields a short child whose
    /// reads fail with [`ReaderErrorKind::EndOfData`] at the true end.
    pub(crate) fn child(&mut self, len: usize) -> Reader<'a> {
        let start = self.position;
        let end = start.saturating_add(len).min(self.bytes.len());
        self.position = end;
        Reader {
            bytes: &self.bytes[start..end],
            position: 0,
            base: self.base + start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_advance_the_position() {
        let mut reader = Reader::from_byte_slice(&[1, 2, 3, 4]);
        assert_eq!(reader.read_byte().unwrap(), 1);
        assert_eq!(reader.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(reader.buffer_position(), 3);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn exhausted_reader_reports_end_of_data() {
        let mut reader = Reader::from_byte_slice(&[1]);
        reader.read_byte().unwrap();
        let err = reader.read_byte().unwrap_err();
        assert!(err.is_end_of_data());
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn push_back_rewinds_one_speculative_read() {
        let mut reader = Reader::from_byte_slice(&[0x40, 0x41]);
        assert_eq!(reader.read_byte().unwrap(), 0x40);
        reader.push_back(1);
        assert_eq!(reader.read_byte().unwrap(), 0x40);
        assert_eq!(reader.read_byte().unwrap(), 0x41);
    }

    #[test]
    fn child_positions_are_absolute() {
        let mut reader = Reader::from_byte_slice(&[0, 1, 2, 3, 4, 5]);
        reader.read_bytes(2).unwrap();
        let mut child = reader.child(3);
        assert_eq!(child.buffer_position(), 2);
        assert_eq!(child.read_byte().unwrap(), 2);
        assert_eq!(child.remaining(), 2);
        // parent has skipped the whole child region
        assert_eq!(reader.buffer_position(), 5);
        assert_eq!(reader.read_byte().unwrap(), 5);
    }

    #[test]
    fn child_is_clamped_to_available_bytes() {
        let mut reader = Reader::from_byte_slice(&[9, 9]);
        let mut child = reader.child(10);
        assert_eq!(child.remaining(), 2);
        child.read_bytes(2).unwrap();
        assert!(child.read_byte().unwrap_err().is_end_of_data());
    }
}
