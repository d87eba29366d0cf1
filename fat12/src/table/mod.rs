//! File allocation table decoding
//!
//! FAT12 stores one 12-bit entry per cluster, packed two entries per three bytes:
//!
//! ```text
//! byte0 = AAAAAAAA   byte1 = BBBBaaaa   byte2 = bbbbbbbb
//! even entry = aaaa AAAAAAAA     odd entry = bbbbbbbb BBBB
//! ```

pub mod chain;

pub use chain::ClusterChain;

use crate::image::ImageBuffer;
use crate::types::{FAT_BAD, FAT_LAST, FAT_UNUSED};
use crate::volume::Layout;

/// Meaning of a FAT entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatEntry {
    /// Cluster is free (0x000)
    Free,
    /// Cluster is marked bad (0xFF7)
    Bad,
    /// Last cluster of its chain (0xFF8..=0xFFF)
    Last,
    /// Next cluster in the chain
    Next(u16),
}

impl FatEntry {
    /// Classify a raw 12-bit value
    pub fn classify(value: u16) -> Self {
        if is_free(value) {
            Self::Free
        } else if is_bad(value) {
            Self::Bad
        } else if is_last(value) {
            Self::Last
        } else {
            Self::Next(value)
        }
    }
}

/// End-of-chain test; matches every value carrying all bits of 0xFF8
pub fn is_last(value: u16) -> bool {
    value & FAT_LAST == FAT_LAST
}

/// Bad-cluster test
pub fn is_bad(value: u16) -> bool {
    value == FAT_BAD
}

/// Free-cluster test
pub fn is_free(value: u16) -> bool {
    value == FAT_UNUSED
}

/// Unpack one entry from its 3-byte group; `odd` selects the second entry of the pair
pub fn decode_pair(group: [u8; 3], odd: bool) -> u16 {
    let [b0, b1, b2] = group.map(u16::from);
    if odd {
        (b1 >> 4) | (b2 << 4)
    } else {
        b0 | ((b1 & 0x0F) << 8)
    }
}

/// Read-only view of every FAT copy in an image
#[derive(Debug, Clone, Copy)]
pub struct FatTable<'a> {
    image: &'a ImageBuffer,
    layout: &'a Layout,
}

impl<'a> FatTable<'a> {
    /// View the FAT copies described by `layout`
    pub fn new(image: &'a ImageBuffer, layout: &'a Layout) -> Self {
        Self { image, layout }
    }

    /// Number of FAT copies
    pub fn copies(&self) -> usize {
        self.layout.fat_count() as usize
    }

    /// Number of entries one copy can hold (copy size in bytes * 2 / 3)
    pub fn cluster_count(&self) -> usize {
        (self.layout.fat_size() * 2 / 3) as usize
    }

    /// Raw value of `cluster` in FAT copy `copy`
    ///
    /// Out-of-range copies or clusters, and entries lying past the end of the
    /// image, read as `FAT_UNUSED`.
    pub fn entry(&self, copy: usize, cluster: usize) -> u16 {
        if copy >= self.copies() || cluster >= self.cluster_count() {
            return FAT_UNUSED;
        }

        let copy_base = self.layout.fat_base(copy as u64);
        let group = copy_base + (cluster / 2) as u64 * 3;
        if group + 3 > copy_base + self.layout.fat_size() {
            return FAT_UNUSED;
        }

        match self.image.array::<3>(group) {
            Some(bytes) => decode_pair(bytes, cluster % 2 == 1),
            None => FAT_UNUSED,
        }
    }

    /// Classified successor of `cluster`, read from the first FAT copy
    pub fn successor(&self, cluster: u16) -> FatEntry {
        FatEntry::classify(self.entry(0, cluster as usize))
    }

    /// Every `(cluster, value)` pair of one copy, in cluster order
    pub fn entries(&self, copy: usize) -> impl Iterator<Item = (usize, u16)> + 'a {
        let table = *self;
        (0..self.cluster_count()).map(move |cluster| (cluster, table.entry(copy, cluster)))
    }

    /// Clusters of a chain starting at `seed`
    pub fn chain(&self, seed: u16, max_len: usize) -> ClusterChain<'a> {
        ClusterChain::new(*self, seed, max_len)
    }

    /// Is `cluster` a number a chain may legitimately point at?
    pub fn is_addressable(&self, cluster: u16) -> bool {
        cluster >= crate::types::FIRST_DATA_CLUSTER && (cluster as usize) < self.cluster_count()
    }
}
