//! Region layout
//!
//! A FAT12 volume is laid out as consecutive regions:
//!
//! ```text
//! | boot | FAT copy 0 | FAT copy 1 | ... | root directory | data (cluster 2, 3, ...) |
//! ```
//!
//! All bases are byte offsets from the start of the image and are derived from
//! the boot header. With the usual 1.44MB geometry the FATs start at sector 1,
//! the root directory at sector 19 and cluster 2 at sector 33.

use super::boot::BootHeader;
use crate::types::{DIR_ENTRY_SIZE, FIRST_DATA_CLUSTER};

/// Physical region an offset falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Boot sector and other reserved sectors
    Reserved,
    /// One of the FAT copies
    Fat,
    /// Fixed-size root directory
    RootDirectory,
    /// Cluster-addressed data region
    Data,
}

/// Byte offsets of every region of a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    bytes_per_sector: u64,
    cluster_size: u64,
    fat_base: u64,
    fat_size: u64,
    fat_count: u64,
    root_base: u64,
    root_len: u64,
    root_sectors: u64,
    data_base: u64,
}

impl Layout {
    /// Compute the layout described by a boot header
    pub fn new(header: &BootHeader) -> Self {
        let bytes_per_sector = header.bytes_per_sector as u64;
        let cluster_size = header.cluster_size() as u64;

        // The boot sector is always there even if the reserved count says otherwise
        let reserved = (header.reserved_sectors as u64).max(1);
        let fat_base = reserved * bytes_per_sector;
        let fat_size = header.sectors_per_fat as u64 * bytes_per_sector;
        let fat_count = header.fat_count as u64;

        let root_base = fat_base + fat_size * fat_count;
        let root_len = header.root_entry_count as u64 * DIR_ENTRY_SIZE as u64;
        let root_sectors = if bytes_per_sector == 0 {
            0
        } else {
            root_len.div_ceil(bytes_per_sector)
        };
        let data_base = root_base + root_sectors * bytes_per_sector;

        Self {
            bytes_per_sector,
            cluster_size,
            fat_base,
            fat_size,
            fat_count,
            root_base,
            root_len,
            root_sectors,
            data_base,
        }
    }

    /// Bytes per sector
    pub fn bytes_per_sector(&self) -> u64 {
        self.bytes_per_sector
    }

    /// Bytes per cluster
    pub fn cluster_size(&self) -> u64 {
        self.cluster_size
    }

    /// Size of one FAT copy in bytes
    pub fn fat_size(&self) -> u64 {
        self.fat_size
    }

    /// Number of FAT copies
    pub fn fat_count(&self) -> u64 {
        self.fat_count
    }

    /// Start of FAT copy `copy`
    pub fn fat_base(&self, copy: u64) -> u64 {
        self.fat_base + copy * self.fat_size
    }

    /// Start of the root directory
    pub fn root_base(&self) -> u64 {
        self.root_base
    }

    /// End of the root directory (exclusive), exactly `max entries * 32` past its base
    pub fn root_end(&self) -> u64 {
        self.root_base + self.root_len
    }

    /// First sector of the root directory
    pub fn root_first_sector(&self) -> u64 {
        self.root_base.checked_div(self.bytes_per_sector).unwrap_or(0)
    }

    /// Last sector of the root directory (inclusive), `None` if it has no sectors
    pub fn root_last_sector(&self) -> Option<u64> {
        self.root_sectors
            .checked_sub(1)
            .map(|last| self.root_first_sector() + last)
    }

    /// Start of the data region, where cluster 2 lives
    pub fn data_base(&self) -> u64 {
        self.data_base
    }

    /// Address of the placeholder cluster 0, so cluster `n` is at `logical_base + n * cluster_size`
    pub fn logical_base(&self) -> Option<u64> {
        self.data_base
            .checked_sub(FIRST_DATA_CLUSTER as u64 * self.cluster_size)
    }

    /// Which region an offset falls in
    pub fn region_of(&self, offset: u64) -> Region {
        if offset < self.fat_base {
            Region::Reserved
        } else if offset < self.root_base {
            Region::Fat
        } else if offset < self.data_base {
            Region::RootDirectory
        } else {
            Region::Data
        }
    }

    /// Byte offset of a logical cluster; clusters 0 and 1 have none
    pub fn cluster_offset(&self, cluster: u16) -> Option<u64> {
        if cluster < FIRST_DATA_CLUSTER || self.cluster_size == 0 {
            return None;
        }
        Some(self.data_base + (cluster - FIRST_DATA_CLUSTER) as u64 * self.cluster_size)
    }

    /// Logical cluster containing a data-region offset
    pub fn cluster_of(&self, offset: u64) -> Option<u16> {
        let relative = offset.checked_sub(self.data_base)?;
        let index = relative.checked_div(self.cluster_size)?;
        u16::try_from(index + FIRST_DATA_CLUSTER as u64).ok()
    }
}
