//! Single-pass record scanner.

use log::{debug, trace, warn};

use bstr::ByteSlice;

use crate::error::{Error, Result};

use super::fields::FieldCursor;
use super::markers::{FIELD_GAP, MARKER_LEN, Marker, SECTION_TAG};
use super::records::{Author, Entry, SectionLabel, Work};

/// Upper bounds on the work a single scan may do.
///
/// `None` means unlimited. The buffer itself is already bounded by
/// [`MAX_IDT_SIZE`](super::MAX_IDT_SIZE), so these guard callers that want
/// to stop early on suspicious input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanLimits {
    pub max_works: Option<usize>,
    pub max_labels: Option<usize>,
}

impl ScanLimits {
    /// No limits beyond the buffer size
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Fail once more than `max` works would be decoded.
    pub fn with_max_works(mut self, max: usize) -> Self {
        self.max_works = Some(max);
        self
    }

    /// Fail on any work carrying more than `max` section labels.
    pub fn with_max_labels(mut self, max: usize) -> Self {
        self.max_labels = Some(max);
        self
    }
}

/// Walks an `.idt` buffer from start to end, yielding one [`Entry`] per work.
///
/// Author records are not yielded; they replace the current author that is
/// attached to every following work. The scanner stops at the first error.
pub struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
    author: Author,
    limits: ScanLimits,
    works: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    /// Scan `data` from its first byte with no limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, ScanLimits::default())
    }

    pub fn with_limits(data: &'a [u8], limits: ScanLimits) -> Self {
        Self {
            data,
            pos: 0,
            author: Author::default(),
            limits,
            works: 0,
            failed: false,
        }
    }

    /// Offset of the next byte to examine
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The most recent author record, or an unset author if none was seen
    pub fn current_author(&self) -> &Author {
        &self.author
    }

    /// Decode every remaining work, failing on the first error.
    pub fn scan_all(self) -> Result<Vec<Entry>> {
        self.collect()
    }

    fn next_entry(&mut self) -> Result<Option<Entry>> {
        while self.pos < self.data.len() {
            match Marker::at(self.data, self.pos) {
                Some(Marker::Author) => self.read_author()?,
                Some(Marker::Work) => return self.read_work().map(Some),
                None => {
                    trace!("No marker at {:#06x}, advancing", self.pos);
                    self.pos += 1;
                }
            }
        }
        Ok(None)
    }

    fn read_author(&mut self) -> Result<()> {
        let start = self.pos;
        let mut cursor = FieldCursor::new(self.data, start + MARKER_LEN);

        let id = cursor.read_masked_id("author id")?;
        cursor.skip("author gap", FIELD_GAP)?;
        let name = cursor.read_counted("author name")?;

        debug!(
            "Author at {:#06x}: {} ({})",
            start,
            id.as_bstr(),
            name.as_bstr()
        );
        self.author = Author { id, name };
        self.pos = cursor.position();
        Ok(())
    }

    fn read_work(&mut self) -> Result<Entry> {
        let start = self.pos;
        if let Some(max) = self.limits.max_works
            && self.works >= max
        {
            return Err(Error::LimitExceeded {
                what: "works",
                limit: max,
            });
        }

        // Marker::at already guaranteed the full prefix is present
        let block = Marker::block_number(self.data, start).unwrap_or_default();
        let mut cursor = FieldCursor::new(self.data, start + MARKER_LEN);

        let id = cursor.read_masked_id("work id")?;
        cursor.skip("work gap", FIELD_GAP)?;
        let title = cursor.read_counted("work title")?;

        let mut labels = Vec::new();
        while cursor.peek() == Some(SECTION_TAG) {
            if let Some(max) = self.limits.max_labels
                && labels.len() >= max
            {
                return Err(Error::LimitExceeded {
                    what: "section labels",
                    limit: max,
                });
            }
            cursor.skip("section tag", 1)?;
            let level = cursor.read_u8("section level")?;
            let text = cursor.read_counted("section label")?;
            labels.push(SectionLabel { level, text });
        }

        if self.author.is_unset() {
            warn!("Work {} at {:#06x} precedes any author record", id.as_bstr(), start);
        }
        debug!(
            "Work at {:#06x}: {} block {} ({}), {} labels",
            start,
            id.as_bstr(),
            block,
            title.as_bstr(),
            labels.len()
        );

        self.pos = cursor.position();
        self.works += 1;
        Ok(Entry {
            author: self.author.clone(),
            work: Work {
                id,
                block,
                title,
                labels,
            },
            offset: start,
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_entry() {
            Ok(entry) => entry.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
