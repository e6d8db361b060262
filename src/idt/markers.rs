//! Record markers in `.idt` catalogs.
//!
//! Each record starts with a 7-byte prefix:
//!
//! ```text
//! offset  0     1  2  3      4      5     6
//!         tag   .. .. blk_hi blk_lo 0xEF  kind
//! ```
//!
//! - Author: tag `0x01`, kind `0x80`
//! - Work: tag `0x02`, kind `0x81`, block number big-endian at offsets 3-4
//!
//! The prefix is followed by a `0xFF`-terminated 7-bit id, a two byte gap
//! and a length-prefixed display string. Works are then followed by any
//! number of `0x11` section label sub-records.

pub const AUTHOR_TAG: u8 = 0x01;
pub const WORK_TAG: u8 = 0x02;
pub const MARKER_ESCAPE: u8 = 0xEF;
pub const AUTHOR_KIND: u8 = 0x80;
pub const WORK_KIND: u8 = 0x81;
pub const SECTION_TAG: u8 = 0x11;
pub const ID_TERMINATOR: u8 = 0xFF;

/// Length of the marker prefix
pub const MARKER_LEN: usize = 7;
/// Bytes skipped between an id terminator and the following length byte
pub const FIELD_GAP: usize = 2;

/// Record kind announced by a marker prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Author,
    Work,
}

impl Marker {
    /// Recognize a marker prefix starting at `pos`.
    ///
    /// Fewer than [`MARKER_LEN`] remaining bytes never match.
    pub fn at(data: &[u8], pos: usize) -> Option<Self> {
        let prefix = data.get(pos..pos.checked_add(MARKER_LEN)?)?;
        match (prefix[0], prefix[5], prefix[6]) {
            (AUTHOR_TAG, MARKER_ESCAPE, AUTHOR_KIND) => Some(Marker::Author),
            (WORK_TAG, MARKER_ESCAPE, WORK_KIND) => Some(Marker::Work),
            _ => None,
        }
    }

    /// Block number stored in a work prefix at `pos`.
    pub fn block_number(data: &[u8], pos: usize) -> Option<u16> {
        let hi = *data.get(pos.checked_add(3)?)?;
        let lo = *data.get(pos.checked_add(4)?)?;
        Some(u16::from_be_bytes([hi, lo]))
    }
}
