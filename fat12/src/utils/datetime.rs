//! DOS date/time decoding
//!
//! Directory entries carry packed 16-bit timestamps. They are kept raw in
//! [`DirEntry`](crate::DirEntry) and decoded here on request.

/// Packed DOS date: bits 15-9 year since 1980, 8-5 month, 4-0 day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosDate {
    /// Full year (1980-2107)
    pub year: u16,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,
}

impl DosDate {
    /// Unpack a raw date word
    pub fn from_raw(raw: u16) -> Self {
        Self {
            year: 1980 + (raw >> 9),
            month: ((raw >> 5) & 0x0F) as u8,
            day: (raw & 0x1F) as u8,
        }
    }
}

/// Packed DOS time: bits 15-11 hour, 10-5 minute, 4-0 seconds / 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosTime {
    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-58, two-second resolution)
    pub second: u8,
}

impl DosTime {
    /// Unpack a raw time word
    pub fn from_raw(raw: u16) -> Self {
        Self {
            hour: (raw >> 11) as u8,
            minute: ((raw >> 5) & 0x3F) as u8,
            second: ((raw & 0x1F) * 2) as u8,
        }
    }
}
