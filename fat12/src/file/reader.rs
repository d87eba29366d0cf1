//! Positioned file reader

use crate::directory::DirEntry;
use crate::error::{Fat12Error, Result};
use crate::table::ClusterChain;
use crate::volume::Fat12Volume;

/// Sequential reader over one file's clusters
pub struct FileReader<'v> {
    volume: &'v Fat12Volume,
    file: DirEntry,
    position: u64,
    chain: ClusterChain<'v>,
    /// Last cluster taken from `chain` and its index within the file
    current: Option<(usize, u16)>,
}

impl<'v> FileReader<'v> {
    /// Create new file reader; only regular files can be read
    pub fn new(volume: &'v Fat12Volume, file: DirEntry) -> Result<Self> {
        if file.is_directory() || file.is_volume_label() {
            return Err(Fat12Error::NotFound);
        }
        Ok(Self {
            volume,
            file,
            position: 0,
            chain: Self::fresh_chain(volume, &file),
            current: None,
        })
    }

    fn fresh_chain(volume: &'v Fat12Volume, file: &DirEntry) -> ClusterChain<'v> {
        volume
            .fat()
            .chain(file.first_logical_cluster, volume.max_chain_length())
    }

    /// Cluster holding the `index`th cluster-sized piece of the file
    ///
    /// Moving forward continues the cached chain; moving back restarts it.
    fn cluster_at(&mut self, index: usize) -> Result<u16> {
        match self.current {
            Some((at, cluster)) if at == index => return Ok(cluster),
            Some((at, _)) if at < index => {}
            _ => {
                self.chain = Self::fresh_chain(self.volume, &self.file);
                self.current = None;
            }
        }

        loop {
            let next_index = self.current.map_or(0, |(at, _)| at + 1);
            let cluster = self.chain.next().ok_or(Fat12Error::MalformedChain)??;
            self.current = Some((next_index, cluster));
            if next_index == index {
                return Ok(cluster);
            }
        }
    }

    /// Read bytes from current position
    ///
    /// Returns 0 at end of file.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let size = self.size();
        let cluster_size = self.volume.layout().cluster_size();
        if self.position >= size || buffer.is_empty() {
            return Ok(0);
        }
        if cluster_size == 0 {
            return Err(Fat12Error::MalformedChain);
        }

        let index = (self.position / cluster_size) as usize;
        let within = self.position % cluster_size;
        let cluster = self.cluster_at(index)?;

        let offset = self
            .volume
            .layout()
            .cluster_offset(cluster)
            .ok_or(Fat12Error::MalformedChain)?;

        let available = (cluster_size - within).min(size - self.position);
        let len = (buffer.len() as u64).min(available) as usize;
        let bytes = self
            .volume
            .image()
            .bytes(offset + within, len)
            .ok_or(Fat12Error::MalformedChain)?;

        buffer[..len].copy_from_slice(bytes);
        self.position += len as u64;
        Ok(len)
    }

    /// Seek to position
    pub fn seek(&mut self, pos: u64) {
        self.position = pos;
        self.chain = Self::fresh_chain(self.volume, &self.file);
        self.current = None;
    }

    /// Get current position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get file size
    pub fn size(&self) -> u64 {
        self.file.file_size as u64
    }
}
