//! Volume opening and boot header tests

mod common;

use common::Fat12Builder;
use fat12::error::Fat12Error;
use fat12::{open, Fat12Volume, Limits};

#[test]
fn test_open_floppy_image() {
    let volume = open(Fat12Builder::new().build()).expect("open should succeed");
    let header = volume.header();

    assert_eq!(header.oem_name(), b"MSDOS5.0");
    assert_eq!(header.bytes_per_sector, 512);
    assert_eq!(header.sectors_per_cluster, 1);
    assert_eq!(header.reserved_sectors, 1);
    assert_eq!(header.fat_count, 2);
    assert_eq!(header.root_entry_count, 224);
    assert_eq!(header.total_sectors(), 2880);
    assert_eq!(header.sectors_per_fat, 9);
    assert_eq!(header.sectors_per_track, 18);
    assert_eq!(header.head_count, 2);
    assert!(header.has_extended_signature());
    assert_eq!(header.volume_id, 0x1234_5678);
    assert_eq!(header.volume_label(), b"TESTDISK");
    assert_eq!(&header.fs_type, b"FAT12   ");
}

#[test]
fn test_layout_of_floppy() {
    let volume = open(Fat12Builder::new().build()).expect("open should succeed");
    let layout = volume.layout();

    assert_eq!(layout.fat_base(0), 512, "FAT 1 follows the boot sector");
    assert_eq!(layout.fat_base(1), 10 * 512);
    assert_eq!(layout.root_base(), 19 * 512);
    assert_eq!(layout.root_last_sector(), Some(32));
    assert_eq!(layout.data_base(), 33 * 512);
    assert_eq!(layout.logical_base(), Some(31 * 512));
}

#[test]
fn test_layout_follows_reserved_sectors() {
    let mut builder = Fat12Builder::new();
    builder.data_mut()[0x0E..0x10].copy_from_slice(&2u16.to_le_bytes());
    // FAT 1 now starts at sector 2; cluster 2 moves to sector 34
    builder.data_mut()[2 * 512..2 * 512 + 3].copy_from_slice(&[0xF0, 0xFF, 0xFF]);
    builder.data_mut()[2 * 512 + 3..2 * 512 + 6].copy_from_slice(&[0xFF, 0x0F, 0x00]);
    builder.write_entry(20 * 512, b"MOVED   ", b"TXT", common::builder::ATTR_ARCHIVE, 2, 4);
    builder.data_mut()[34 * 512..34 * 512 + 4].copy_from_slice(b"here");
    let volume = open(builder.build()).unwrap();
    let layout = volume.layout();

    assert_eq!(layout.fat_base(0), 2 * 512);
    assert_eq!(layout.fat_base(1), 11 * 512);
    assert_eq!(layout.root_base(), 20 * 512);
    assert_eq!(layout.data_base(), 34 * 512);
    assert_eq!(volume.fat().entry(0, 2), 0xFFF);

    let entry = fat12::find_file(&volume, "moved.txt").unwrap();
    assert_eq!(fat12::read_file(&volume, &entry).unwrap(), b"here");
}

#[test]
fn test_zero_reserved_sectors_keeps_boot_sector() {
    let mut builder = Fat12Builder::new();
    builder.data_mut()[0x0E..0x10].copy_from_slice(&0u16.to_le_bytes());
    let volume = open(builder.build()).unwrap();

    assert_eq!(volume.layout().fat_base(0), 512);
    assert_eq!(volume.layout().root_base(), 19 * 512);
}

#[test]
fn test_open_invalid_signature() {
    let mut builder = Fat12Builder::new();
    builder.set_fs_type(b"FAT16   ");
    assert_eq!(open(builder.build()).unwrap_err(), Fat12Error::InvalidImage);
}

#[test]
fn test_signature_checked_regardless_of_geometry() {
    // Garbage everywhere except the tag still opens
    let mut data = vec![0xA5u8; 64];
    data[0x36..0x3E].copy_from_slice(b"FAT12   ");
    assert!(open(data.clone()).is_ok());

    // Perfect geometry with the wrong tag does not
    data[0x36..0x3E].copy_from_slice(b"FAT32   ");
    assert_eq!(open(data).unwrap_err(), Fat12Error::InvalidImage);

    assert_eq!(open(vec![0u8; 2880 * 512]).unwrap_err(), Fat12Error::InvalidImage);
}

#[test]
fn test_tag_compared_by_prefix() {
    let mut builder = Fat12Builder::new();
    builder.set_fs_type(b"FAT12XYZ");
    assert!(open(builder.build()).is_ok());
}

#[test]
fn test_open_short_buffer() {
    assert_eq!(open(Vec::new()).unwrap_err(), Fat12Error::InvalidImage);
    assert_eq!(open(vec![0u8; 40]).unwrap_err(), Fat12Error::InvalidImage);
}

#[test]
fn test_open_read_only() {
    let data = Fat12Builder::new().build();
    let volume = open(data.clone()).expect("open should succeed");
    let _ = fat12::find_file(&volume, "missing.txt");
    assert_eq!(volume.into_image().as_bytes(), &data[..], "Open should not modify image");
}

#[test]
fn test_open_with_limits() {
    let limits = Limits {
        max_directory_depth: 4,
        max_chain_length: Some(10),
    };
    let volume = Fat12Volume::open_with(Fat12Builder::new().build(), limits).expect("open should succeed");
    assert_eq!(volume.limits(), &limits);
    assert_eq!(volume.max_chain_length(), 10);

    let volume = open(Fat12Builder::new().build()).expect("open should succeed");
    assert_eq!(volume.limits(), &Limits::default());
    assert_eq!(volume.max_chain_length(), volume.fat().cluster_count());
}

#[test]
fn test_error_display() {
    assert_eq!(Fat12Error::InvalidImage.to_string(), "Not a FAT12 image");
    assert_eq!(Fat12Error::NotFound.to_string(), "File or directory not found");
    assert_ne!(
        Fat12Error::MalformedChain.to_string(),
        Fat12Error::AllocationFailure.to_string()
    );
}

#[test]
fn test_concurrent_traversals() {
    let mut builder = Fat12Builder::new();
    let docs = builder.add_dir(common::Parent::Root, "docs");
    builder.add_file(docs, "a.txt", b"alpha");
    builder.add_file(common::Parent::Root, "b.txt", b"bravo");
    let volume = open(builder.build()).unwrap();

    std::thread::scope(|scope| {
        for path in ["docs/a.txt", "b.txt", "DOCS/A.TXT", "./b.txt"] {
            let volume = &volume;
            scope.spawn(move || {
                let entry = fat12::find_file(volume, path).unwrap();
                assert_eq!(fat12::read_file(volume, &entry).unwrap().len(), 5);
            });
        }
    });
}
