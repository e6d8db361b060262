//! Decoded catalog records.
//!
//! Ids are 7-bit ASCII after unmasking. Display strings (names, titles,
//! labels) are kept as the raw 8-bit bytes found in the file.

use bstr::BString;

/// The author currently in effect while scanning.
///
/// `Default` is the "no author seen yet" value: works that appear before
/// the first author marker are reported with empty id and name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Packed 7-bit identifier (e.g. `LAT0474`)
    pub id: BString,
    /// Display name, raw bytes in the catalog's 8-bit code page
    pub name: BString,
}

impl Author {
    /// True until the first author record has been read
    pub fn is_unset(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

/// A hierarchical citation level attached to a work (book, chapter, line...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabel {
    pub level: u8,
    pub text: BString,
}

/// A catalogued work ("book") with its section labels in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Work {
    pub id: BString,
    pub block: u16,
    pub title: BString,
    pub labels: Vec<SectionLabel>,
}

/// One decoded output line: a work paired with the author in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub author: Author,
    pub work: Work,
    /// Buffer offset of the work marker
    pub offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_author_is_unset() {
        assert!(Author::default().is_unset());

        let author = Author {
            id: "LAT0474".into(),
            name: BString::default(),
        };
        assert!(!author.is_unset());
    }
}
