//! Directory block traversal
//!
//! A directory is read as a sequence of blocks of entries. Where the next block
//! comes from depends on the region the current one lives in:
//!
//! - **Root directory**: blocks are single sectors; the successor is the next
//!   physical sector until the fixed end of the root region. The FAT is never
//!   consulted.
//! - **Data region**: blocks are whole clusters; the successor is the cluster's
//!   FAT link, and the directory ends on a free, bad or last marker.

use super::entry::DirEntry;
use super::Directory;
use crate::error::{Fat12Error, Result};
use crate::table::chain::ChainGuard;
use crate::table::FatEntry;
use crate::types::DIR_ENTRY_SIZE;
use crate::volume::{Fat12Volume, Region};

/// A run of directory entries read from one sector or cluster
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    /// Image offset of the block
    pub offset: u64,

    /// Raw block contents
    pub bytes: &'a [u8],
}

impl<'a> Block<'a> {
    /// Number of whole entries in the block
    pub fn len(&self) -> usize {
        self.bytes.len() / DIR_ENTRY_SIZE
    }

    /// Does the block hold no entry?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at `index`
    pub fn entry(&self, index: usize) -> Option<DirEntry> {
        let start = index.checked_mul(DIR_ENTRY_SIZE)?;
        let raw = self.bytes.get(start..start + DIR_ENTRY_SIZE)?;
        let raw: &[u8; DIR_ENTRY_SIZE] = raw.try_into().ok()?;
        Some(DirEntry::parse(raw, self.offset + start as u64))
    }
}

/// Iterator over the blocks of one directory
pub struct DirectoryBlocks<'v> {
    volume: &'v Fat12Volume,
    next: Option<Result<u64>>,
    guard: ChainGuard,
}

impl<'v> DirectoryBlocks<'v> {
    /// Blocks of `dir`
    pub fn new(volume: &'v Fat12Volume, dir: Directory) -> Self {
        let layout = volume.layout();
        let next = match dir {
            Directory::Root if layout.root_end() > layout.root_base() => Some(Ok(layout.root_base())),
            Directory::Root => None,
            Directory::Sub(cluster) => Some(
                layout
                    .cluster_offset(cluster)
                    .ok_or(Fat12Error::MalformedChain),
            ),
        };

        Self {
            volume,
            next,
            guard: ChainGuard::new(volume.max_chain_length()),
        }
    }

    /// Read the block starting at `offset`
    fn block_at(&mut self, offset: u64) -> Result<Block<'v>> {
        let layout = self.volume.layout();
        let len = match layout.region_of(offset) {
            Region::RootDirectory => {
                let remaining = layout.root_end().saturating_sub(offset);
                layout.bytes_per_sector().min(remaining)
            }
            Region::Data => {
                let cluster = layout
                    .cluster_of(offset)
                    .ok_or(Fat12Error::MalformedChain)?;
                if !self.volume.fat().is_addressable(cluster) {
                    log::warn!("directory cluster {:#05x} outside the table", cluster);
                    return Err(Fat12Error::MalformedChain);
                }
                self.guard.visit(cluster)?;
                layout.cluster_size()
            }
            Region::Reserved | Region::Fat => {
                log::warn!("directory block at {:#x} outside root and data regions", offset);
                return Err(Fat12Error::MalformedChain);
            }
        };

        let len = usize::try_from(len).map_err(|_| Fat12Error::MalformedChain)?;
        if len == 0 {
            return Err(Fat12Error::MalformedChain);
        }

        let bytes = self.volume.image().bytes(offset, len).ok_or_else(|| {
            log::warn!("directory block at {:#x} runs past the end of the image", offset);
            Fat12Error::MalformedChain
        })?;

        log::trace!("directory block at {:#x}, {} bytes", offset, len);
        Ok(Block { offset, bytes })
    }

    /// Offset of the block following the one at `offset`, if any
    fn successor(&self, offset: u64) -> Result<Option<u64>> {
        let layout = self.volume.layout();
        match layout.region_of(offset) {
            Region::RootDirectory => {
                let sector = offset / layout.bytes_per_sector() + 1;
                match layout.root_last_sector() {
                    Some(last) if sector <= last => Ok(Some(sector * layout.bytes_per_sector())),
                    _ => Ok(None),
                }
            }
            Region::Data => {
                let cluster = layout
                    .cluster_of(offset)
                    .ok_or(Fat12Error::MalformedChain)?;
                match self.volume.fat().successor(cluster) {
                    FatEntry::Next(next) => layout
                        .cluster_offset(next)
                        .map(Some)
                        .ok_or(Fat12Error::MalformedChain),
                    FatEntry::Free | FatEntry::Bad | FatEntry::Last => Ok(None),
                }
            }
            Region::Reserved | Region::Fat => Err(Fat12Error::MalformedChain),
        }
    }
}

impl<'v> Iterator for DirectoryBlocks<'v> {
    type Item = Result<Block<'v>>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = match self.next.take()? {
            Ok(offset) => offset,
            Err(e) => return Some(Err(e)),
        };

        let block = match self.block_at(offset) {
            Ok(block) => block,
            Err(e) => return Some(Err(e)),
        };
        self.next = self.successor(offset).transpose();

        Some(Ok(block))
    }
}

/// Iterator over every entry slot of one directory, unused slots included
pub struct DirectoryEntries<'v> {
    blocks: DirectoryBlocks<'v>,
    current: Option<Block<'v>>,
    index: usize,
}

impl<'v> DirectoryEntries<'v> {
    /// Entries of `dir`
    pub fn new(volume: &'v Fat12Volume, dir: Directory) -> Self {
        Self {
            blocks: DirectoryBlocks::new(volume, dir),
            current: None,
            index: 0,
        }
    }
}

impl<'v> Iterator for DirectoryEntries<'v> {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.and_then(|block| block.entry(self.index)) {
                self.index += 1;
                return Some(Ok(entry));
            }

            match self.blocks.next()? {
                Ok(block) => {
                    self.current = Some(block);
                    self.index = 0;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
