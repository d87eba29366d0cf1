//! File reading
//!
//! A file's bytes are the concatenation of its clusters, cut at the size
//! recorded in its directory entry.

pub mod reader;

pub use reader::FileReader;

use crate::directory::DirEntry;
use crate::error::{Fat12Error, Result};
use crate::volume::Fat12Volume;
use alloc::vec::Vec;

/// Read file contents
///
/// # Arguments
/// * `volume` - Opened volume
/// * `file` - Entry of a regular file
///
/// # Returns
/// Exactly `file.file_size` bytes
///
/// # Errors
/// * `NotFound` - the entry is a directory or volume label
/// * `MalformedChain` - the chain loops or ends before the recorded size
/// * `AllocationFailure` - no memory for the contents
pub fn read_file(volume: &Fat12Volume, file: &DirEntry) -> Result<Vec<u8>> {
    if file.is_directory() || file.is_volume_label() {
        return Err(Fat12Error::NotFound);
    }

    let size = file.file_size as usize;
    let mut data = Vec::new();
    // A file can never hold more than the image itself
    data.try_reserve_exact(size.min(volume.image().len()))
        .map_err(|_| Fat12Error::AllocationFailure)?;

    let cluster_size = volume.layout().cluster_size() as usize;
    let chain = volume
        .fat()
        .chain(file.first_logical_cluster, volume.max_chain_length());

    for cluster in chain {
        if data.len() >= size {
            break;
        }
        let cluster = cluster?;
        let offset = volume
            .layout()
            .cluster_offset(cluster)
            .ok_or(Fat12Error::MalformedChain)?;
        let take = (size - data.len()).min(cluster_size);
        let bytes = volume
            .image()
            .bytes(offset, take)
            .ok_or(Fat12Error::MalformedChain)?;
        data.extend_from_slice(bytes);
    }

    if data.len() < size {
        log::warn!(
            "chain of {} ends after {} of {} bytes",
            file.short_name(),
            data.len(),
            size
        );
        return Err(Fat12Error::MalformedChain);
    }

    Ok(data)
}
