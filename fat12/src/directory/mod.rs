//! Directory navigation
//!
//! Root and subdirectories are presented through one [`Directory`] type even
//! though they are addressed differently on disk (see [`walker`]).

pub mod entry;
pub mod path;
pub mod tree;
pub mod walker;

pub use entry::{Attributes, DirEntry};
pub use path::find_file;
pub use tree::{walk_tree, Visitor};
pub use walker::{Block, DirectoryBlocks, DirectoryEntries};

use crate::volume::Fat12Volume;

/// A directory to traverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Directory {
    /// The fixed root directory region
    Root,

    /// A subdirectory starting at the given logical cluster
    Sub(u16),
}

impl Directory {
    /// Directory described by an entry, `None` if the entry is not a subdirectory
    ///
    /// A first cluster of 0 refers to the root, as in the `..` entry of a
    /// top-level subdirectory.
    pub fn from_entry(entry: &DirEntry) -> Option<Self> {
        if !entry.is_directory() {
            return None;
        }
        match entry.first_logical_cluster {
            0 => Some(Self::Root),
            cluster => Some(Self::Sub(cluster)),
        }
    }

    /// Blocks making up the directory
    pub fn blocks(self, volume: &Fat12Volume) -> DirectoryBlocks<'_> {
        DirectoryBlocks::new(volume, self)
    }

    /// Every entry slot of the directory, unused ones included
    pub fn entries(self, volume: &Fat12Volume) -> DirectoryEntries<'_> {
        DirectoryEntries::new(volume, self)
    }
}
