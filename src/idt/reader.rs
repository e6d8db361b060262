//! Loading catalogs into memory and decoding them in one call.
//!
//! The whole file is read before scanning starts. Anything larger than
//! [`MAX_IDT_SIZE`] is rejected up front instead of being truncated.

use std::io::Read;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

use super::records::Entry;
use super::scanner::{ScanLimits, Scanner};

/// Largest catalog accepted, in bytes
pub const MAX_IDT_SIZE: usize = 0xF800;

/// Read an `.idt` file and decode all of its works
pub fn read_idt<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    read_idt_with_limits(path, ScanLimits::default())
}

/// Read an `.idt` file, stopping with an error once `limits` are exceeded
pub fn read_idt_with_limits<P: AsRef<Path>>(path: P, limits: ScanLimits) -> Result<Vec<Entry>> {
    let data = load_idt(path)?;
    Scanner::with_limits(&data, limits).scan_all()
}

/// Decode an `.idt` catalog from any Read source
pub fn read_idt_from_reader<R: Read>(reader: R) -> Result<Vec<Entry>> {
    read_idt_from_reader_with_limits(reader, ScanLimits::default())
}

/// Decode an `.idt` catalog from any Read source under `limits`
pub fn read_idt_from_reader_with_limits<R: Read>(
    reader: R,
    limits: ScanLimits,
) -> Result<Vec<Entry>> {
    let data = load_idt_from_reader(reader)?;
    Scanner::with_limits(&data, limits).scan_all()
}

/// Load a catalog file into memory, enforcing [`MAX_IDT_SIZE`].
pub fn load_idt<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;

    let size = file.metadata()?.len();
    if size > MAX_IDT_SIZE as u64 {
        return Err(Error::TooLarge {
            size,
            limit: MAX_IDT_SIZE,
        });
    }

    let data = load_idt_from_reader(file)?;
    info!("Loaded {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

/// Load a catalog from a reader, enforcing [`MAX_IDT_SIZE`].
///
/// Reads at most one byte past the limit so oversized input is detected
/// without buffering all of it.
pub fn load_idt_from_reader<R: Read>(reader: R) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(MAX_IDT_SIZE);
    reader
        .take(MAX_IDT_SIZE as u64 + 1)
        .read_to_end(&mut data)?;

    if data.len() > MAX_IDT_SIZE {
        return Err(Error::TooLarge {
            size: data.len() as u64,
            limit: MAX_IDT_SIZE,
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_load_at_limit() {
        let data = vec![0u8; MAX_IDT_SIZE];
        let loaded = load_idt_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(loaded.len(), MAX_IDT_SIZE);
    }

    #[test]
    fn test_load_over_limit() {
        let data = vec![0u8; MAX_IDT_SIZE + 10];
        let err = load_idt_from_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            Error::TooLarge {
                size,
                limit: MAX_IDT_SIZE
            } if size == MAX_IDT_SIZE as u64 + 1
        ));
    }

    #[test]
    fn test_read_from_reader() {
        let mut data = vec![0x02, 0x00, 0x00, 0x00, 0x05, 0xEF, 0x81];
        data.extend_from_slice(&[0xC1, 0xC2, 0xFF, 0x00, 0x00, 0x03, b'X', b'Y', b'Z']);

        let entries = read_idt_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].work.id, "AB");
        assert_eq!(entries[0].work.title, "XYZ");
        assert_eq!(entries[0].work.block, 5);
    }

    #[test]
    fn test_read_from_reader_with_limits() {
        let mut data = Vec::new();
        for block in [1u8, 2] {
            data.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, block, 0xEF, 0x81]);
            data.extend_from_slice(&[0xC1, 0xFF, 0x00, 0x00, 0x01, b'T']);
            data.extend_from_slice(&[0x11, 0x00, 0x01, b'l']);
        }

        let limits = ScanLimits::unlimited().with_max_works(1);
        let err = read_idt_from_reader_with_limits(Cursor::new(&data), limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { what: "works", limit: 1 }));

        let limits = ScanLimits::unlimited().with_max_labels(0);
        let err = read_idt_from_reader_with_limits(Cursor::new(&data), limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { what: "section labels", .. }));

        let limits = ScanLimits::unlimited().with_max_works(2).with_max_labels(1);
        let entries = read_idt_from_reader_with_limits(Cursor::new(&data), limits).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].work.block, 2);
    }
}
