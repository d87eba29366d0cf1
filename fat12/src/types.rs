//! Common types and constants for FAT12

/// Size of one directory entry in bytes
pub const DIR_ENTRY_SIZE: usize = 32;

/// The boot header starts after the 3-byte jump instruction
pub const BOOT_HEADER_OFFSET: usize = 3;

/// Length of the boot header record (bytes 3..62 of the boot sector)
pub const BOOT_HEADER_LEN: usize = 59;

/// Filesystem-type tag every image must carry
pub const FS_TYPE_TAG: &[u8; 5] = b"FAT12";

/// First cluster number that addresses data; 0 and 1 are placeholders
pub const FIRST_DATA_CLUSTER: u16 = 2;

/// FAT value for a free cluster (also returned for out-of-range lookups)
pub const FAT_UNUSED: u16 = 0x000;

/// FAT value for a cluster marked bad
pub const FAT_BAD: u16 = 0xFF7;

/// FAT end-of-chain marker; any value matching all of its bits is "last"
pub const FAT_LAST: u16 = 0xFF8;

/// Default maximum directory nesting followed by tree walks
pub const MAX_DIRECTORY_DEPTH: usize = 64;

/// Directory entry attribute bits
pub mod attr {
    /// Read-only file
    pub const READ_ONLY: u8 = 0x01;
    /// Hidden file
    pub const HIDDEN: u8 = 0x02;
    /// System file
    pub const SYSTEM: u8 = 0x04;
    /// Volume label
    pub const VOLUME_LABEL: u8 = 0x08;
    /// Subdirectory
    pub const SUBDIRECTORY: u8 = 0x10;
    /// Archive
    pub const ARCHIVE: u8 = 0x20;
}

/// Traversal limits applied by a mounted volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest subdirectory level a tree walk will descend to
    pub max_directory_depth: usize,

    /// Longest cluster chain followed in one walk.
    ///
    /// `None` bounds chains by the number of clusters the FAT can describe.
    pub max_chain_length: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_directory_depth: MAX_DIRECTORY_DEPTH,
            max_chain_length: None,
        }
    }
}
