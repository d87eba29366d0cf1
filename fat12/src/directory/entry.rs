//! Directory entry record
//!
//! Every directory, root included, is an array of 32-byte entries:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 8 | name, space padded |
//! | 8  | 3 | extension, space padded |
//! | 11 | 1 | attributes |
//! | 12 | 2 | reserved |
//! | 14 | 2 | creation time |
//! | 16 | 2 | creation date |
//! | 18 | 2 | last access date |
//! | 20 | 2 | high cluster word (unused by FAT12) |
//! | 22 | 2 | last write time |
//! | 24 | 2 | last write date |
//! | 26 | 2 | first logical cluster |
//! | 28 | 4 | file size |

use crate::types::{attr, DIR_ENTRY_SIZE};
use crate::utils::datetime::{DosDate, DosTime};
use crate::utils::string;
use alloc::string::String;

/// First name byte of a deleted entry
pub const DELETED_MARKER: u8 = 0xE5;

/// Attribute bits of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    /// Read-only
    pub read_only: bool,

    /// Hidden
    pub hidden: bool,

    /// System
    pub system: bool,

    /// Volume label
    pub volume_label: bool,

    /// Subdirectory
    pub directory: bool,

    /// Archive
    pub archive: bool,
}

impl Attributes {
    /// Decode the attribute byte
    pub fn from_byte(value: u8) -> Self {
        Self {
            read_only: value & attr::READ_ONLY != 0,
            hidden: value & attr::HIDDEN != 0,
            system: value & attr::SYSTEM != 0,
            volume_label: value & attr::VOLUME_LABEL != 0,
            directory: value & attr::SUBDIRECTORY != 0,
            archive: value & attr::ARCHIVE != 0,
        }
    }
}

/// Decoded 32-byte directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    /// Name (8 chars, space padded)
    pub name: [u8; 8],

    /// Extension (3 chars, space padded)
    pub ext: [u8; 3],

    /// Attribute byte; 0 marks an unused slot
    pub attr: u8,

    /// Reserved word
    pub reserved: u16,

    /// Creation time (DOS format)
    pub creation_time: u16,

    /// Creation date (DOS format)
    pub creation_date: u16,

    /// Last access date (DOS format)
    pub last_access_date: u16,

    /// High cluster word, ignored by FAT12
    pub cluster_high: u16,

    /// Last write time (DOS format)
    pub last_write_time: u16,

    /// Last write date (DOS format)
    pub last_write_date: u16,

    /// First logical cluster
    pub first_logical_cluster: u16,

    /// File size in bytes
    pub file_size: u32,

    /// Image offset the entry was read from (0 for the synthetic root)
    pub offset: u64,
}

impl DirEntry {
    /// Decode an entry found at `offset`
    pub fn parse(raw: &[u8; DIR_ENTRY_SIZE], offset: u64) -> Self {
        let u16_at = |at: usize| u16::from_le_bytes([raw[at], raw[at + 1]]);

        let mut name = [0u8; 8];
        name.copy_from_slice(&raw[0..8]);
        let mut ext = [0u8; 3];
        ext.copy_from_slice(&raw[8..11]);

        Self {
            name,
            ext,
            attr: raw[11],
            reserved: u16_at(12),
            creation_time: u16_at(14),
            creation_date: u16_at(16),
            last_access_date: u16_at(18),
            cluster_high: u16_at(20),
            last_write_time: u16_at(22),
            last_write_date: u16_at(24),
            first_logical_cluster: u16_at(26),
            file_size: u32::from_le_bytes([raw[28], raw[29], raw[30], raw[31]]),
            offset,
        }
    }

    /// Stand-in entry for the root directory, which has no record of its own
    pub fn root() -> Self {
        Self {
            name: *b"/       ",
            ext: *b"   ",
            attr: attr::SUBDIRECTORY,
            reserved: 0,
            creation_time: 0,
            creation_date: 0,
            last_access_date: 0,
            cluster_high: 0,
            last_write_time: 0,
            last_write_date: 0,
            first_logical_cluster: 0,
            file_size: 0,
            offset: 0,
        }
    }

    /// Is this the root stand-in?
    pub fn is_root(&self) -> bool {
        *self == Self::root()
    }

    /// Decoded attribute bits
    pub fn attributes(&self) -> Attributes {
        Attributes::from_byte(self.attr)
    }

    /// Unused slot (attribute byte 0)
    pub fn is_unused(&self) -> bool {
        self.attr == 0
    }

    /// Deleted entry
    pub fn is_deleted(&self) -> bool {
        self.name[0] == DELETED_MARKER
    }

    /// Is this a subdirectory?
    pub fn is_directory(&self) -> bool {
        self.attr & attr::SUBDIRECTORY != 0
    }

    /// Is this a volume label (long-name fragments included)?
    pub fn is_volume_label(&self) -> bool {
        self.attr & attr::VOLUME_LABEL != 0
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.is_unused() && !self.is_directory() && !self.is_volume_label()
    }

    /// Name without padding
    pub fn name(&self) -> &[u8] {
        string::trim_trailing_spaces(&self.name)
    }

    /// Extension without padding
    pub fn extension(&self) -> &[u8] {
        string::trim_trailing_spaces(&self.ext)
    }

    /// The `.` self reference of a subdirectory
    pub fn is_self_reference(&self) -> bool {
        self.name() == b"." && self.extension().is_empty()
    }

    /// The `..` parent reference of a subdirectory
    pub fn is_parent_reference(&self) -> bool {
        self.name() == b".." && self.extension().is_empty()
    }

    /// Either dot entry
    pub fn is_dot_entry(&self) -> bool {
        self.is_self_reference() || self.is_parent_reference()
    }

    /// `NAME.EXT`, or `NAME` when the extension is blank
    pub fn short_name(&self) -> String {
        string::short_name(&self.name, &self.ext)
    }

    /// Last write timestamp
    pub fn last_write(&self) -> (DosDate, DosTime) {
        (
            DosDate::from_raw(self.last_write_date),
            DosTime::from_raw(self.last_write_time),
        )
    }
}
