use std::collections::HashMap;

pub const SECTOR_SIZE: usize = 512;
pub const TOTAL_SECTORS: usize = 2880;
pub const SECTORS_PER_FAT: usize = 9;
pub const FAT_COUNT: usize = 2;
pub const ROOT_ENTRIES: usize = 224;
pub const ROOT_BASE: usize = 19 * SECTOR_SIZE;
pub const DATA_BASE: usize = 33 * SECTOR_SIZE;

pub const ATTR_READ_ONLY: u8 = 0x01;
pub const ATTR_HIDDEN: u8 = 0x02;
pub const ATTR_VOLUME_LABEL: u8 = 0x08;
pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_ARCHIVE: u8 = 0x20;

/// Where a new entry goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Dir(u16),
}

/// Synthesizes 1.44MB FAT12 images
pub struct Fat12Builder {
    data: Vec<u8>,
    root_used: usize,
    next_free: u16,
    // first cluster -> (clusters of the directory, used slots)
    dirs: HashMap<u16, (Vec<u16>, usize)>,
}

impl Fat12Builder {
    pub fn new() -> Self {
        let mut data = vec![0u8; TOTAL_SECTORS * SECTOR_SIZE];

        data[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
        data[0x03..0x0B].copy_from_slice(b"MSDOS5.0");
        data[0x0B..0x0D].copy_from_slice(&(SECTOR_SIZE as u16).to_le_bytes());
        data[0x0D] = 1; // Sectors per cluster
        data[0x0E..0x10].copy_from_slice(&1u16.to_le_bytes()); // Reserved sectors
        data[0x10] = FAT_COUNT as u8;
        data[0x11..0x13].copy_from_slice(&(ROOT_ENTRIES as u16).to_le_bytes());
        data[0x13..0x15].copy_from_slice(&(TOTAL_SECTORS as u16).to_le_bytes());
        data[0x15] = 0xF0; // Media descriptor
        data[0x16..0x18].copy_from_slice(&(SECTORS_PER_FAT as u16).to_le_bytes());
        data[0x18..0x1A].copy_from_slice(&18u16.to_le_bytes()); // Sectors per track
        data[0x1A..0x1C].copy_from_slice(&2u16.to_le_bytes()); // Heads
        data[0x26] = 0x29; // Extended boot signature
        data[0x27..0x2B].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        data[0x2B..0x36].copy_from_slice(b"TESTDISK   ");
        data[0x36..0x3E].copy_from_slice(b"FAT12   ");
        data[510] = 0x55;
        data[511] = 0xAA;

        let mut builder = Self {
            data,
            root_used: 0,
            next_free: 2,
            dirs: HashMap::new(),
        };
        // Media byte and reserved entry
        builder.set_fat(0, 0xFF0);
        builder.set_fat(1, 0xFFF);
        builder
    }

    /// Raw image bytes, for tests that poke at the layout directly
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn set_fs_type(&mut self, tag: &[u8; 8]) {
        self.data[0x36..0x3E].copy_from_slice(tag);
    }

    /// Set a FAT entry in every copy
    pub fn set_fat(&mut self, cluster: u16, value: u16) {
        for copy in 0..FAT_COUNT {
            self.set_fat_copy(copy, cluster, value);
        }
    }

    /// Set a FAT entry in one copy
    pub fn set_fat_copy(&mut self, copy: usize, cluster: u16, value: u16) {
        let base = SECTOR_SIZE + copy * SECTORS_PER_FAT * SECTOR_SIZE;
        let at = base + (cluster as usize / 2) * 3;
        let value = value & 0x0FFF;
        if cluster % 2 == 0 {
            self.data[at] = value as u8;
            self.data[at + 1] = (self.data[at + 1] & 0xF0) | (value >> 8) as u8;
        } else {
            self.data[at + 1] = (self.data[at + 1] & 0x0F) | ((value & 0x0F) << 4) as u8;
            self.data[at + 2] = (value >> 4) as u8;
        }
    }

    pub fn cluster_offset(cluster: u16) -> usize {
        DATA_BASE + (cluster as usize - 2) * SECTOR_SIZE
    }

    /// Write a raw 32-byte entry
    pub fn write_entry(
        &mut self,
        offset: usize,
        name: &[u8; 8],
        ext: &[u8; 3],
        attr: u8,
        cluster: u16,
        size: u32,
    ) {
        let e = &mut self.data[offset..offset + 32];
        e.fill(0);
        e[0..8].copy_from_slice(name);
        e[8..11].copy_from_slice(ext);
        e[11] = attr;
        e[26..28].copy_from_slice(&cluster.to_le_bytes());
        e[28..32].copy_from_slice(&size.to_le_bytes());
    }

    /// Append a raw entry to a directory
    pub fn add_entry(
        &mut self,
        parent: Parent,
        name: &[u8; 8],
        ext: &[u8; 3],
        attr: u8,
        cluster: u16,
        size: u32,
    ) -> usize {
        let offset = self.next_slot(parent);
        self.write_entry(offset, name, ext, attr, cluster, size);
        offset
    }

    /// Allocate `count` consecutive clusters linked into one chain
    pub fn alloc_chain(&mut self, count: usize) -> Vec<u16> {
        let clusters: Vec<u16> = (0..count as u16).map(|i| self.next_free + i).collect();
        self.next_free += count as u16;
        for pair in clusters.windows(2) {
            self.set_fat(pair[0], pair[1]);
        }
        if let Some(&last) = clusters.last() {
            self.set_fat(last, 0xFFF);
        }
        clusters
    }

    /// Add a file; returns its first cluster (0 for an empty file)
    pub fn add_file(&mut self, parent: Parent, name: &str, content: &[u8]) -> u16 {
        let (name, ext) = split_name(name);
        let count = content.len().div_ceil(SECTOR_SIZE);
        let clusters = self.alloc_chain(count);
        for (cluster, chunk) in clusters.iter().zip(content.chunks(SECTOR_SIZE)) {
            let at = Self::cluster_offset(*cluster);
            self.data[at..at + chunk.len()].copy_from_slice(chunk);
        }
        let first = clusters.first().copied().unwrap_or(0);
        self.add_entry(parent, &name, &ext, ATTR_ARCHIVE, first, content.len() as u32);
        first
    }

    /// Add a subdirectory with `.` and `..`; returns it as a parent for further entries
    pub fn add_dir(&mut self, parent: Parent, name: &str) -> Parent {
        let (name, ext) = split_name(name);
        let cluster = self.alloc_chain(1)[0];
        self.dirs.insert(cluster, (vec![cluster], 0));

        let parent_cluster = match parent {
            Parent::Root => 0,
            Parent::Dir(c) => c,
        };
        self.add_entry(Parent::Dir(cluster), b".       ", b"   ", ATTR_DIRECTORY, cluster, 0);
        self.add_entry(Parent::Dir(cluster), b"..      ", b"   ", ATTR_DIRECTORY, parent_cluster, 0);
        self.add_entry(parent, &name, &ext, ATTR_DIRECTORY, cluster, 0);
        Parent::Dir(cluster)
    }

    fn next_slot(&mut self, parent: Parent) -> usize {
        match parent {
            Parent::Root => {
                assert!(self.root_used < ROOT_ENTRIES, "root directory full");
                let offset = ROOT_BASE + self.root_used * 32;
                self.root_used += 1;
                offset
            }
            Parent::Dir(first) => {
                let per_cluster = SECTOR_SIZE / 32;
                let (clusters, used) = self.dirs.get(&first).cloned().expect("unknown directory");
                if used == clusters.len() * per_cluster {
                    // Grow the directory by one cluster
                    let extra = self.next_free;
                    self.next_free += 1;
                    let last = *clusters.last().unwrap();
                    self.set_fat(last, extra);
                    self.set_fat(extra, 0xFFF);
                    self.dirs.get_mut(&first).unwrap().0.push(extra);
                }
                let (clusters, used) = self.dirs.get_mut(&first).unwrap();
                let cluster = clusters[*used / per_cluster];
                let offset = Self::cluster_offset(cluster) + (*used % per_cluster) * 32;
                *used += 1;
                offset
            }
        }
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// "hello.txt" -> ("HELLO   ", "TXT")
pub fn split_name(name: &str) -> ([u8; 8], [u8; 3]) {
    let upper = name.to_ascii_uppercase();
    let (base, ext) = upper.split_once('.').unwrap_or((upper.as_str(), ""));
    let mut n = [b' '; 8];
    let mut e = [b' '; 3];
    n[..base.len()].copy_from_slice(base.as_bytes());
    e[..ext.len()].copy_from_slice(ext.as_bytes());
    (n, e)
}
