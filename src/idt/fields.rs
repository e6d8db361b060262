//! Bounds-checked field reads over an in-memory catalog buffer.

use bstr::BString;
use memchr::memchr;

use crate::error::{Error, Result};

use super::markers::ID_TERMINATOR;

/// A forward-only cursor over the catalog bytes.
///
/// Every read checks the remaining length first; a read that would run
/// past the end fails with [`Error::OutOfBounds`] and leaves the cursor
/// where it was.
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Start a cursor at `pos`. A position past the end is allowed; every
    /// read from it fails.
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Byte under the cursor, `None` at end of buffer.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn take(&mut self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        let data: &'a [u8] = self.data;
        let Some(bytes) = self
            .pos
            .checked_add(len)
            .and_then(|end| data.get(self.pos..end))
        else {
            return Err(Error::OutOfBounds {
                field,
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        };
        self.pos += len;
        Ok(bytes)
    }

    /// Advance past `len` bytes without reading them.
    pub fn skip(&mut self, field: &'static str, len: usize) -> Result<()> {
        self.take(field, len).map(|_| ())
    }

    /// Read a single byte, such as a length or level id.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(field, 1)?[0])
    }

    /// Read a 7-bit packed id terminated by a raw `0xFF`.
    ///
    /// The terminator is consumed but not part of the id; the cursor ends on
    /// the byte right after it.
    pub fn read_masked_id(&mut self, field: &'static str) -> Result<BString> {
        let rest = self.data.get(self.pos..).unwrap_or_default();
        let Some(end) = memchr(ID_TERMINATOR, rest) else {
            return Err(Error::OutOfBounds {
                field,
                offset: self.pos,
                needed: rest.len() + 1,
                available: rest.len(),
            });
        };
        let id: Vec<u8> = rest[..end].iter().map(|b| b & 0x7F).collect();
        self.pos += end + 1;
        Ok(BString::from(id))
    }

    /// Read a length byte followed by exactly that many raw bytes.
    pub fn read_counted(&mut self, field: &'static str) -> Result<BString> {
        let start = self.pos;
        let count = self.read_u8(field)? as usize;
        match self.take(field, count) {
            Ok(bytes) => Ok(BString::from(bytes)),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_id() {
        let data = [0xC1, 0xC2, 0xFF, 0x20];
        let mut cursor = FieldCursor::new(&data, 0);
        assert_eq!(cursor.read_masked_id("id").unwrap(), "AB");
        // Terminator consumed, next field starts right after it
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.peek(), Some(0x20));
    }

    #[test]
    fn test_masked_id_empty() {
        let data = [0xFF, 0x00];
        let mut cursor = FieldCursor::new(&data, 0);
        assert_eq!(cursor.read_masked_id("id").unwrap(), "");
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_masked_id_unterminated() {
        let data = [0xC1, 0xC2];
        let mut cursor = FieldCursor::new(&data, 0);
        let err = cursor.read_masked_id("id").unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { field: "id", offset: 0, .. }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_counted_is_verbatim() {
        let data = [0x03, 0x58, 0x59, 0x5A, 0x99];
        let mut cursor = FieldCursor::new(&data, 0);
        assert_eq!(cursor.read_counted("title").unwrap(), "XYZ");
        assert_eq!(cursor.position(), 4);

        // High bytes are kept as-is
        let data = [0x02, 0xE1, 0xF3];
        let mut cursor = FieldCursor::new(&data, 0);
        assert_eq!(cursor.read_counted("title").unwrap().as_slice(), &[0xE1, 0xF3]);
    }

    #[test]
    fn test_counted_past_end() {
        let data = [0x05, b'a', b'b'];
        let mut cursor = FieldCursor::new(&data, 0);
        match cursor.read_counted("title") {
            Err(Error::OutOfBounds {
                field,
                offset,
                needed,
                available,
            }) => {
                assert_eq!(field, "title");
                assert_eq!(offset, 1);
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_missing_length_byte() {
        let mut cursor = FieldCursor::new(&[], 0);
        assert!(cursor.read_counted("name").is_err());
        assert!(cursor.read_u8("level").is_err());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_cursor_past_end() {
        let data = [1, 2];
        let mut cursor = FieldCursor::new(&data, 5);
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            cursor.skip("gap", 0),
            Err(Error::OutOfBounds { offset: 5, needed: 0, .. })
        ));
        assert!(cursor.read_masked_id("id").is_err());
        assert!(cursor.read_counted("name").is_err());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_skip() {
        let data = [1, 2, 3];
        let mut cursor = FieldCursor::new(&data, 1);
        cursor.skip("gap", 2).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.skip("gap", 1).is_err());
    }
}
