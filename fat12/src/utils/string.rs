//! String handling utilities
//!
//! 8.3 names are stored as space-padded byte fields in the disk's code page.

use alloc::string::String;

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    &bytes[..end]
}

/// Render a name/extension pair as `NAME.EXT`
///
/// The dot is left out when the extension is blank. Bytes outside ASCII are
/// mapped one-to-one onto Latin-1 characters.
pub fn short_name(name: &[u8], ext: &[u8]) -> String {
    let name = trim_trailing_spaces(name);
    let ext = trim_trailing_spaces(ext);

    let mut s = String::with_capacity(name.len() + ext.len() + 1);
    s.extend(name.iter().map(|&c| char::from(c)));
    if !ext.is_empty() {
        s.push('.');
        s.extend(ext.iter().map(|&c| char::from(c)));
    }
    s
}
