//! PHI/TLG `.idt` catalog decoding.
//!
//! An `.idt` file indexes the authors and works of a corpus, together with
//! the citation levels (book, chapter, line...) used inside each work.

mod fields;
mod markers;
mod reader;
mod records;
mod scanner;
mod writer;

pub use fields::FieldCursor;
pub use markers::Marker;
pub use reader::{
    MAX_IDT_SIZE, load_idt, load_idt_from_reader, read_idt, read_idt_from_reader,
    read_idt_from_reader_with_limits, read_idt_with_limits,
};
pub use records::{Author, Entry, SectionLabel, Work};
pub use scanner::{ScanLimits, Scanner};
pub use writer::{write_entries, write_entry, write_entry_decoded};
