//! Text decoding helpers for catalog display strings.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// Look up a legacy code page by its WHATWG label (`"windows-1252"`,
/// `"iso-8859-7"`, `"latin1"`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode an 8-bit display string to UTF-8.
///
/// Uses `Cow<str>` to avoid allocation when the input is plain ASCII.
/// Malformed sequences become U+FFFD rather than failing.
pub fn decode_text<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (result, _) = encoding.decode_without_bom_handling(bytes);
    result
}
