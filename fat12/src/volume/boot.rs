//! Boot header parsing
//!
//! The boot header is the BIOS parameter block plus the extended boot record,
//! stored at byte 3 of sector 0 right after the jump instruction.

use crate::error::{Fat12Error, Result};
use crate::image::ImageBuffer;
use crate::types::{BOOT_HEADER_LEN, BOOT_HEADER_OFFSET, FS_TYPE_TAG};
use crate::utils::string;

// Field offsets from the start of the image
const OEM_NAME: u64 = 0x03;
const BYTES_PER_SECTOR: u64 = 0x0B;
const SECTORS_PER_CLUSTER: u64 = 0x0D;
const RESERVED_SECTORS: u64 = 0x0E;
const FAT_COUNT: u64 = 0x10;
const ROOT_ENTRY_COUNT: u64 = 0x11;
const TOTAL_SECTORS_16: u64 = 0x13;
const MEDIA_DESCRIPTOR: u64 = 0x15;
const SECTORS_PER_FAT: u64 = 0x16;
const SECTORS_PER_TRACK: u64 = 0x18;
const HEAD_COUNT: u64 = 0x1A;
const HIDDEN_SECTORS: u64 = 0x1C;
const TOTAL_SECTORS_32: u64 = 0x20;
const DRIVE_NUMBER: u64 = 0x24;
const BOOT_SIGNATURE: u64 = 0x26;
const VOLUME_ID: u64 = 0x27;
const VOLUME_LABEL: u64 = 0x2B;
const FS_TYPE: u64 = 0x36;

/// Extended boot signature announcing volume id, label and type fields
pub const EXTENDED_BOOT_SIGNATURE: u8 = 0x29;

/// Decoded boot header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootHeader {
    /// OEM / volume name (8 chars, space padded)
    pub oem_name: [u8; 8],

    /// Bytes per sector
    pub bytes_per_sector: u16,

    /// Sectors per cluster
    pub sectors_per_cluster: u8,

    /// Reserved sectors before the first FAT (boot sector included)
    pub reserved_sectors: u16,

    /// Number of FAT copies
    pub fat_count: u8,

    /// Maximum number of root directory entries
    pub root_entry_count: u16,

    /// Total sector count (16-bit, 0 when the 32-bit field is used)
    pub total_sectors_16: u16,

    /// Media descriptor byte
    pub media_descriptor: u8,

    /// Sectors per FAT copy
    pub sectors_per_fat: u16,

    /// Sectors per track
    pub sectors_per_track: u16,

    /// Number of heads
    pub head_count: u16,

    /// Sectors preceding the volume
    pub hidden_sectors: u32,

    /// Total sector count (32-bit variant)
    pub total_sectors_32: u32,

    /// BIOS drive number
    pub drive_number: u8,

    /// Boot signature (0x29 when the following fields are valid)
    pub boot_signature: u8,

    /// Volume serial number
    pub volume_id: u32,

    /// Volume label (11 chars, space padded)
    pub volume_label: [u8; 11],

    /// Filesystem type tag (8 chars, space padded)
    pub fs_type: [u8; 8],
}

impl BootHeader {
    /// Parse the boot header from the start of an image
    ///
    /// Only the filesystem tag is validated; geometry is taken as given.
    pub fn parse(image: &ImageBuffer) -> Result<Self> {
        if image.len() < BOOT_HEADER_OFFSET + BOOT_HEADER_LEN {
            log::debug!("image of {} bytes cannot hold a boot header", image.len());
            return Err(Fat12Error::InvalidImage);
        }

        let header = Self::decode(image).ok_or(Fat12Error::InvalidImage)?;

        if !header.fs_type.starts_with(FS_TYPE_TAG) {
            log::debug!("wrong filesystem type {:?}", string::trim_trailing_spaces(&header.fs_type));
            return Err(Fat12Error::InvalidImage);
        }

        Ok(header)
    }

    fn decode(image: &ImageBuffer) -> Option<Self> {
        Some(Self {
            oem_name: image.array(OEM_NAME)?,
            bytes_per_sector: image.read_u16_le(BYTES_PER_SECTOR)?,
            sectors_per_cluster: image.read_u8(SECTORS_PER_CLUSTER)?,
            reserved_sectors: image.read_u16_le(RESERVED_SECTORS)?,
            fat_count: image.read_u8(FAT_COUNT)?,
            root_entry_count: image.read_u16_le(ROOT_ENTRY_COUNT)?,
            total_sectors_16: image.read_u16_le(TOTAL_SECTORS_16)?,
            media_descriptor: image.read_u8(MEDIA_DESCRIPTOR)?,
            sectors_per_fat: image.read_u16_le(SECTORS_PER_FAT)?,
            sectors_per_track: image.read_u16_le(SECTORS_PER_TRACK)?,
            head_count: image.read_u16_le(HEAD_COUNT)?,
            hidden_sectors: image.read_u32_le(HIDDEN_SECTORS)?,
            total_sectors_32: image.read_u32_le(TOTAL_SECTORS_32)?,
            drive_number: image.read_u8(DRIVE_NUMBER)?,
            boot_signature: image.read_u8(BOOT_SIGNATURE)?,
            volume_id: image.read_u32_le(VOLUME_ID)?,
            volume_label: image.array(VOLUME_LABEL)?,
            fs_type: image.array(FS_TYPE)?,
        })
    }

    /// Total sector count, preferring the 16-bit field when it is set
    pub fn total_sectors(&self) -> u32 {
        if self.total_sectors_16 != 0 {
            self.total_sectors_16 as u32
        } else {
            self.total_sectors_32
        }
    }

    /// Bytes per cluster
    pub fn cluster_size(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }

    /// Does the header carry the extended boot signature?
    pub fn has_extended_signature(&self) -> bool {
        self.boot_signature == EXTENDED_BOOT_SIGNATURE
    }

    /// OEM name without padding
    pub fn oem_name(&self) -> &[u8] {
        string::trim_trailing_spaces(&self.oem_name)
    }

    /// Volume label without padding
    pub fn volume_label(&self) -> &[u8] {
        string::trim_trailing_spaces(&self.volume_label)
    }
}
