//! Raw image bytes
//!
//! Every structure in the volume is decoded from an [`ImageBuffer`] by offset.
//! Reads are bounds-checked and return `None` past the end of the image.

use crate::error::{Fat12Error, Result};
use alloc::boxed::Box;
use alloc::vec::Vec;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Blocks requested per `read_blocks` call while loading a device
const LOAD_CHUNK_BLOCKS: usize = 64;

/// Immutable, exclusively owned image contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap bytes already in memory
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a whole block device into memory
    ///
    /// # Errors
    /// * `IoFailure` - the device could not report its size or a read failed
    /// * `AllocationFailure` - the image does not fit in memory
    pub fn load<B: BlockIo>(block_io: &mut B) -> Result<Self> {
        let block_size = block_io.block_size().to_u32() as usize;
        if block_size == 0 {
            return Err(Fat12Error::IoFailure);
        }
        let num_blocks = block_io
            .num_blocks()
            .map_err(|_| Fat12Error::IoFailure)?;

        let total = usize::try_from(num_blocks)
            .ok()
            .and_then(|blocks| blocks.checked_mul(block_size))
            .ok_or(Fat12Error::AllocationFailure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(total)
            .map_err(|_| Fat12Error::AllocationFailure)?;
        data.resize(total, 0);

        let mut lba = 0u64;
        for chunk in data.chunks_mut(block_size * LOAD_CHUNK_BLOCKS) {
            block_io
                .read_blocks(Lba(lba), chunk)
                .map_err(|_| Fat12Error::IoFailure)?;
            lba += (chunk.len() / block_size) as u64;
        }

        log::debug!("loaded {} blocks of {} bytes", num_blocks, block_size);
        Ok(Self { data })
    }

    /// Image length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Is the image empty?
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whole image
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// `len` bytes starting at `offset`, if they lie inside the image
    pub fn bytes(&self, offset: u64, len: usize) -> Option<&[u8]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(len)?;
        self.data.get(start..end)
    }

    /// Fixed-size array at `offset`
    pub fn array<const N: usize>(&self, offset: u64) -> Option<[u8; N]> {
        self.bytes(offset, N)?.try_into().ok()
    }

    /// Byte at `offset`
    pub fn read_u8(&self, offset: u64) -> Option<u8> {
        self.bytes(offset, 1).map(|b| b[0])
    }

    /// Little-endian u16 at `offset`
    pub fn read_u16_le(&self, offset: u64) -> Option<u16> {
        self.array(offset).map(u16::from_le_bytes)
    }

    /// Little-endian u32 at `offset`
    pub fn read_u32_le(&self, offset: u64) -> Option<u32> {
        self.array(offset).map(u32::from_le_bytes)
    }
}

impl From<Vec<u8>> for ImageBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Box<[u8]>> for ImageBuffer {
    fn from(data: Box<[u8]>) -> Self {
        Self::new(data.into_vec())
    }
}

impl AsRef<[u8]> for ImageBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
