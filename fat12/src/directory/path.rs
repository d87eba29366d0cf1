//! Path resolution
//!
//! Paths are slash-separated, case-insensitive and anchored at the root. Each
//! component is an 8.3 name: the part before the first `.` is compared with
//! the entry's name field and the rest with its extension field.

use super::entry::DirEntry;
use super::Directory;
use crate::error::{Fat12Error, Result};
use crate::volume::Fat12Volume;
use alloc::string::String;

/// Longest name field
const NAME_LEN: usize = 8;

/// Longest extension field
const EXT_LEN: usize = 3;

/// Find a file or directory by path
///
/// Leading `./` (repeated) and `/` are no-ops; a path that is empty after them
/// resolves to the root, returned as [`DirEntry::root`]. A space ends the path.
///
/// # Arguments
/// * `volume` - Opened volume
/// * `path` - Path to find (e.g. "readme.txt", "./DOCS/NOTES.TXT")
///
/// # Returns
/// Directory entry of the target
///
/// # Errors
/// * `NotFound` - a component matches no entry, or an intermediate component
///   is not a subdirectory
/// * `MalformedChain` - a directory on the way could not be traversed
///
/// # Example
/// ```ignore
/// let entry = fat12::find_file(&volume, "docs/readme.txt")?;
/// println!("{} bytes", entry.file_size);
/// ```
pub fn find_file(volume: &Fat12Volume, path: &str) -> Result<DirEntry> {
    let path: String = path.to_ascii_uppercase();
    let mut rest = match path.find(' ') {
        Some(end) => &path[..end],
        None => path.as_str(),
    };

    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }

    if rest.is_empty() || rest == "." {
        return Ok(DirEntry::root());
    }

    resolve(volume, Directory::Root, rest).map_err(|e| {
        if e == Fat12Error::NotFound {
            log::debug!("{:?} not found", rest);
        }
        e
    })
}

fn resolve(volume: &Fat12Volume, start: Directory, path: &str) -> Result<DirEntry> {
    let mut dir = start;
    let mut rest = path;

    loop {
        let (component, remainder) = match rest.split_once('/') {
            Some((component, remainder)) => (component, Some(remainder)),
            None => (rest, None),
        };

        let entry = lookup(volume, dir, component)?;

        match remainder {
            None => return Ok(entry),
            Some(remainder) => {
                let Some(sub) = Directory::from_entry(&entry) else {
                    log::debug!("{:?} is not a directory", component);
                    return Err(Fat12Error::NotFound);
                };
                if remainder.is_empty() {
                    return Ok(entry);
                }
                dir = sub;
                rest = remainder;
            }
        }
    }
}

/// Split a component into name and extension
fn split_component(component: &str) -> (&str, &str) {
    if component == "." || component == ".." {
        return (component, "");
    }
    component.split_once('.').unwrap_or((component, ""))
}

/// Scan one directory for a component
fn lookup(volume: &Fat12Volume, dir: Directory, component: &str) -> Result<DirEntry> {
    let (name, ext) = split_component(component);
    if name.is_empty() || name.len() > NAME_LEN || ext.len() > EXT_LEN {
        return Err(Fat12Error::NotFound);
    }

    for entry in dir.entries(volume) {
        let entry = entry?;
        if entry.is_unused() || entry.is_volume_label() {
            continue;
        }
        if entry.name().eq_ignore_ascii_case(name.as_bytes())
            && entry.extension().eq_ignore_ascii_case(ext.as_bytes())
        {
            return Ok(entry);
        }
    }

    Err(Fat12Error::NotFound)
}
