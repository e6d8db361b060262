//! Pipe-delimited line output.
//!
//! Each work becomes one line:
//!
//! ```text
//! author_id|work_id|block|author_name|title|level|label|level|label|...\n
//! ```
//!
//! Fields are written as raw bytes unless a code page is given, in which
//! case the display strings are transcoded to UTF-8.

use std::io::Write;

use encoding_rs::Encoding;

use crate::error::Result;
use crate::util::decode_text;

use super::records::Entry;

/// Write one entry as a raw-byte line
pub fn write_entry<W: Write>(w: &mut W, entry: &Entry) -> Result<()> {
    write_line(w, entry, |w, bytes| w.write_all(bytes))
}

/// Write entries as raw-byte lines, in order
pub fn write_entries<W: Write>(w: &mut W, entries: &[Entry]) -> Result<()> {
    for entry in entries {
        write_entry(w, entry)?;
    }
    Ok(())
}

/// Write one entry with display strings decoded from `encoding`.
///
/// Ids are 7-bit and written as-is.
pub fn write_entry_decoded<W: Write>(
    w: &mut W,
    entry: &Entry,
    encoding: &'static Encoding,
) -> Result<()> {
    write_line(w, entry, |w, bytes| {
        w.write_all(decode_text(bytes, encoding).as_bytes())
    })
}

fn write_line<W, F>(w: &mut W, entry: &Entry, mut text: F) -> Result<()>
where
    W: Write,
    F: FnMut(&mut W, &[u8]) -> std::io::Result<()>,
{
    let work = &entry.work;

    w.write_all(&entry.author.id)?;
    w.write_all(b"|")?;
    w.write_all(&work.id)?;
    write!(w, "|{}|", work.block)?;
    text(w, &entry.author.name)?;
    w.write_all(b"|")?;
    text(w, &work.title)?;
    w.write_all(b"|")?;

    for label in &work.labels {
        write!(w, "{}|", label.level)?;
        text(w, &label.text)?;
        w.write_all(b"|")?;
    }

    w.write_all(b"\n")?;
    Ok(())
}
