//! Directory tree listing
//!
//! Depth-first, pre-order: each used entry is handed to the visitor before the
//! walk descends into it. Dot entries are visited but never followed.
//!
//! Deleted subdirectories are entered too. Their clusters may since have been
//! reused by a live directory, so reaching a directory a second time is only an
//! error when both routes to it are live entries.

use super::entry::DirEntry;
use super::Directory;
use crate::error::{Fat12Error, Result};
use crate::volume::Fat12Volume;
use alloc::collections::BTreeMap;

/// Receives every used entry of a tree walk with its depth
pub trait Visitor {
    /// Called once per entry, parents before their children
    fn visit(&mut self, entry: &DirEntry, depth: usize);
}

impl<F> Visitor for F
where
    F: FnMut(&DirEntry, usize),
{
    fn visit(&mut self, entry: &DirEntry, depth: usize) {
        self(entry, depth)
    }
}

/// Walk a directory tree
///
/// Entries of `dir` are visited at depth 0, their children at depth 1 and so
/// on. Deleted subdirectories are entered like live ones; a deleted entry
/// leading to a directory that was already entered is visited but not entered.
///
/// # Errors
/// * `MalformedChain` - a cluster chain loops, a directory is reached twice
///   through live entries, or nesting exceeds the volume's depth limit
pub fn walk_tree<V>(volume: &Fat12Volume, dir: Directory, visitor: &mut V) -> Result<()>
where
    V: Visitor + ?Sized,
{
    let mut entered = BTreeMap::new();
    entered.insert(dir, true);
    walk(volume, dir, 0, &mut entered, visitor)
}

fn walk<V>(
    volume: &Fat12Volume,
    dir: Directory,
    depth: usize,
    // Directory -> entered through a live entry
    entered: &mut BTreeMap<Directory, bool>,
    visitor: &mut V,
) -> Result<()>
where
    V: Visitor + ?Sized,
{
    if depth > volume.limits().max_directory_depth {
        log::warn!("directory nesting deeper than {}", volume.limits().max_directory_depth);
        return Err(Fat12Error::MalformedChain);
    }

    for entry in dir.entries(volume) {
        let entry = entry?;
        if entry.is_unused() {
            continue;
        }

        visitor.visit(&entry, depth);

        if entry.is_dot_entry() {
            continue;
        }
        let Some(sub) = Directory::from_entry(&entry) else {
            continue;
        };

        let live = !entry.is_deleted();
        match entered.get(&sub).copied() {
            None => {}
            Some(_) if !live => {
                log::debug!("deleted {} leads to {:?}, already entered", entry.short_name(), sub);
                continue;
            }
            Some(true) => {
                log::warn!("{:?} reached twice while walking the tree", sub);
                return Err(Fat12Error::MalformedChain);
            }
            Some(false) => {}
        }
        entered.insert(sub, live);
        walk(volume, sub, depth + 1, entered, visitor)?;
    }

    Ok(())
}
