//! Volume handle
//!
//! A [`Fat12Volume`] owns the image bytes, the decoded boot header and the
//! region layout derived from it. Opening fails only if the image cannot hold a
//! boot header or is not tagged `FAT12`; nothing is partially constructed.

pub mod boot;
pub mod layout;

pub use boot::BootHeader;
pub use layout::{Layout, Region};

use crate::error::Result;
use crate::image::ImageBuffer;
use crate::table::FatTable;
use crate::types::Limits;
use gpt_disk_io::BlockIo;

/// An opened, read-only FAT12 image
#[derive(Debug, Clone)]
pub struct Fat12Volume {
    image: ImageBuffer,
    header: BootHeader,
    layout: Layout,
    limits: Limits,
}

impl Fat12Volume {
    /// Open an image with default traversal limits
    pub fn open(image: impl Into<ImageBuffer>) -> Result<Self> {
        Self::open_with(image, Limits::default())
    }

    /// Open an image with explicit traversal limits
    pub fn open_with(image: impl Into<ImageBuffer>, limits: Limits) -> Result<Self> {
        let image = image.into();
        let header = BootHeader::parse(&image)?;
        let layout = Layout::new(&header);

        log::info!(
            "FAT12 volume: {} bytes, {} bytes/sector, {} sectors/cluster, {} FATs of {} sectors, {} root entries",
            image.len(),
            header.bytes_per_sector,
            header.sectors_per_cluster,
            header.fat_count,
            header.sectors_per_fat,
            header.root_entry_count
        );

        Ok(Self {
            image,
            header,
            layout,
            limits,
        })
    }

    /// Boot metadata
    pub fn header(&self) -> &BootHeader {
        &self.header
    }

    /// Region layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Traversal limits in effect
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Underlying image
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// View of the file allocation table
    pub fn fat(&self) -> FatTable<'_> {
        FatTable::new(&self.image, &self.layout)
    }

    /// Longest chain a single walk may follow
    pub fn max_chain_length(&self) -> usize {
        let clusters = self.fat().cluster_count();
        match self.limits.max_chain_length {
            Some(limit) => limit.min(clusters),
            None => clusters,
        }
    }

    /// Release the handle and hand back the image bytes
    pub fn into_image(self) -> ImageBuffer {
        self.image
    }
}

/// Open an in-memory image
///
/// # Arguments
/// * `image` - Raw image bytes (e.g. `Vec<u8>`)
///
/// # Returns
/// Volume handle, or `InvalidImage` if the boot header is missing or not FAT12
pub fn open(image: impl Into<ImageBuffer>) -> Result<Fat12Volume> {
    Fat12Volume::open(image)
}

/// Mount a FAT12 volume from a block device
///
/// Reads every block of the device into memory, then opens it.
///
/// # Arguments
/// * `block_io` - Block device holding the image
///
/// # Returns
/// Volume handle owning a copy of the device contents
pub fn mount<B: BlockIo>(block_io: &mut B) -> Result<Fat12Volume> {
    let image = ImageBuffer::load(block_io)?;
    Fat12Volume::open(image)
}
