//! # idt-reader
//!
//! A small, strict decoder for the `.idt` index files that ship with the
//! PHI Latin and TLG Greek text corpora.
//!
//! An `.idt` file is a flat byte buffer of author records, work records and
//! the section labels attached to each work. Decoding produces one
//! [`Entry`] per work, paired with the author record in effect at that
//! point in the file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use idt_reader::{read_idt, write_entries};
//!
//! let entries = read_idt("lat0474.idt").unwrap();
//! write_entries(&mut std::io::stdout().lock(), &entries).unwrap();
//! ```
//!
//! ## Scanning a buffer
//!
//! [`Scanner`] works on any byte slice and yields entries lazily:
//!
//! ```
//! use idt_reader::Scanner;
//!
//! let data = [
//!     0x02, 0x00, 0x00, 0x00, 0x05, 0xEF, 0x81, // work marker, block 5
//!     0xC1, 0xC2, 0xFF, 0x00, 0x00,             // id "AB", gap
//!     0x03, b'X', b'Y', b'Z',                   // title
//! ];
//!
//! let entry = Scanner::new(&data).next().unwrap().unwrap();
//! assert_eq!(entry.work.id, "AB");
//! assert_eq!(entry.work.block, 5);
//! assert_eq!(entry.work.title, "XYZ");
//! ```

pub mod error;
pub mod idt;
pub(crate) mod util;

pub use error::{Error, Result};
pub use idt::{
    Author, Entry, MAX_IDT_SIZE, ScanLimits, Scanner, SectionLabel, Work, load_idt, read_idt,
    read_idt_from_reader, read_idt_from_reader_with_limits, read_idt_with_limits, write_entries,
    write_entry, write_entry_decoded,
};
pub use util::{decode_text, encoding_for_label};
