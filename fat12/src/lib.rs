//! FAT12 Image Inspector
//!
//! A `no_std`, read-only decoder for raw FAT12 disk images.
//!
//! # Overview
//!
//! FAT12 is the filesystem found on floppy disks and other small volumes. This
//! crate reconstructs the logical structure of an image held in memory:
//! - Boot header parsing (geometry, volume id/label, filesystem tag)
//! - File allocation table decoding (12-bit entries packed two per three bytes)
//! - Directory traversal across the fixed root region and FAT-linked subdirectories
//! - Path resolution against 8.3 directory entries
//! - Depth-first tree listing through a visitor
//!
//! Nothing is ever written back: every value is a projection of the image bytes.
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Image layer** - Owns the bytes, provides bounds-checked reads
//! 2. **Volume layer** - Boot header and region layout
//! 3. **Table layer** - FAT entry decoding and cluster chains
//! 4. **Directory layer** - Entry blocks, path resolution, tree walks
//! 5. **File layer** - Gathers file contents along a cluster chain
//!
//! # Usage
//!
//! ```ignore
//! use fat12::{open, find_file, read_file};
//!
//! // Open an image already read into memory
//! let volume = open(bytes)?;
//!
//! // Find a file by path (case-insensitive)
//! let entry = find_file(&volume, "docs/readme.txt")?;
//!
//! // Read file contents
//! let data = read_file(&volume, &entry)?;
//! ```
//!
//! # Listing
//!
//! ```ignore
//! use fat12::{walk_tree, Directory};
//!
//! walk_tree(&volume, Directory::Root, &mut |entry: &fat12::DirEntry, depth: usize| {
//!     // pre-order, depth-first
//! })?;
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod types;
pub mod image;
pub mod volume;
pub mod table;
pub mod directory;
pub mod file;
pub mod utils;

pub use error::{Fat12Error, Result};
pub use types::Limits;
pub use image::ImageBuffer;
pub use volume::{Fat12Volume, BootHeader};
pub use table::{FatEntry, FatTable};
pub use directory::{DirEntry, Attributes, Directory, Visitor};

// High-level API exports
pub use volume::{mount, open};
pub use directory::{find_file, walk_tree};
pub use file::read_file;
