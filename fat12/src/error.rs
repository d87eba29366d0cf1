//! Error types for FAT12 operations

use core::fmt;

/// Result type for FAT12 operations
pub type Result<T> = core::result::Result<T, Fat12Error>;

/// Errors that can occur while inspecting a FAT12 image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fat12Error {
    /// Memory for the image or a file buffer could not be reserved
    AllocationFailure,

    /// The backing block device failed while the image was loaded
    IoFailure,

    /// Image too short for a boot header, or filesystem tag is not "FAT12"
    InvalidImage,

    /// Path or entry not found
    NotFound,

    /// Cluster chain or directory tree that loops, overruns, or points outside the image
    MalformedChain,
}

impl fmt::Display for Fat12Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure => write!(f, "Memory allocation failed"),
            Self::IoFailure => write!(f, "I/O error reading block device"),
            Self::InvalidImage => write!(f, "Not a FAT12 image"),
            Self::NotFound => write!(f, "File or directory not found"),
            Self::MalformedChain => write!(f, "Malformed cluster chain"),
        }
    }
}
