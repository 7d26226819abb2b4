//! Guest information classes and output structures
//!
//! Byte-exact little-endian layouts the guest parses directly. Field order,
//! widths, and the trailing padding are part of the wire contract.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Cursor;

// ============================================================================
// Information Classes
// ============================================================================

/// Discriminator selecting which output structure a query produces.
///
/// Ordinal values match the guest protocol; anything outside this set is an
/// invalid information class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FileInformationClass {
    Basic = 4,
    Standard = 5,
    Name = 9,
    Position = 14,
    AttributeTag = 35,
}

impl FileInformationClass {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            4 => Some(Self::Basic),
            5 => Some(Self::Standard),
            9 => Some(Self::Name),
            14 => Some(Self::Position),
            35 => Some(Self::AttributeTag),
            _ => None,
        }
    }

    /// Exact output size for fixed-layout classes, `None` for
    /// variable-length ones.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Basic => Some(FileBasicInformation::SIZE),
            Self::Standard => Some(FileStandardInformation::SIZE),
            Self::Position => Some(FilePositionInformation::SIZE),
            Self::AttributeTag => Some(FileAttributeTagInformation::SIZE),
            Self::Name => None,
        }
    }
}

// ============================================================================
// Fixed-Layout Structures
// ============================================================================

/// Timestamps (guest ticks) and attribute flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileBasicInformation {
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
    pub change_time: u64,
    pub file_attributes: u32,
}

impl FileBasicInformation {
    /// 4 x 64-bit ticks + 32-bit attributes + 4 bytes tail padding.
    pub const SIZE: usize = 40;

    /// Encode into the caller buffer; `None` if it does not fit.
    pub fn write_to(&self, buffer: &mut [u8]) -> Option<usize> {
        if buffer.len() < Self::SIZE {
            return None;
        }
        let mut cursor = Cursor::new(buffer);
        cursor.write_u64::<LittleEndian>(self.creation_time).ok()?;
        cursor.write_u64::<LittleEndian>(self.last_access_time).ok()?;
        cursor.write_u64::<LittleEndian>(self.last_write_time).ok()?;
        cursor.write_u64::<LittleEndian>(self.change_time).ok()?;
        cursor.write_u32::<LittleEndian>(self.file_attributes).ok()?;
        cursor.write_u32::<LittleEndian>(0).ok()?; // padding
        Some(Self::SIZE)
    }
}

/// Sizes, link count, and state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStandardInformation {
    pub allocation_size: u64,
    pub end_of_file: u64,
    pub number_of_links: u32,
    pub delete_pending: bool,
    pub directory: bool,
}

impl FileStandardInformation {
    /// 2 x 64-bit sizes + 32-bit link count + 2 flags + 2 bytes padding.
    pub const SIZE: usize = 24;

    pub fn write_to(&self, buffer: &mut [u8]) -> Option<usize> {
        if buffer.len() < Self::SIZE {
            return None;
        }
        let mut cursor = Cursor::new(buffer);
        cursor.write_u64::<LittleEndian>(self.allocation_size).ok()?;
        cursor.write_u64::<LittleEndian>(self.end_of_file).ok()?;
        cursor.write_u32::<LittleEndian>(self.number_of_links).ok()?;
        cursor.write_u8(self.delete_pending as u8).ok()?;
        cursor.write_u8(self.directory as u8).ok()?;
        cursor.write_u16::<LittleEndian>(0).ok()?; // padding
        Some(Self::SIZE)
    }
}

/// Attribute flags plus the reparse tag (0 when the host has no reparse
/// concept for the file).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileAttributeTagInformation {
    pub file_attributes: u32,
    pub reparse_tag: u32,
}

impl FileAttributeTagInformation {
    pub const SIZE: usize = 8;

    pub fn write_to(&self, buffer: &mut [u8]) -> Option<usize> {
        if buffer.len() < Self::SIZE {
            return None;
        }
        let mut cursor = Cursor::new(buffer);
        cursor.write_u32::<LittleEndian>(self.file_attributes).ok()?;
        cursor.write_u32::<LittleEndian>(self.reparse_tag).ok()?;
        Some(Self::SIZE)
    }
}

/// Current byte offset of the logical file cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilePositionInformation {
    pub current_byte_offset: u64,
}

impl FilePositionInformation {
    pub const SIZE: usize = 8;

    pub fn write_to(&self, buffer: &mut [u8]) -> Option<usize> {
        if buffer.len() < Self::SIZE {
            return None;
        }
        let mut cursor = Cursor::new(buffer);
        cursor
            .write_u64::<LittleEndian>(self.current_byte_offset)
            .ok()?;
        Some(Self::SIZE)
    }
}

// ============================================================================
// Name Information
// ============================================================================

/// Byte size of the name-information length prefix.
pub const NAME_INFO_PREFIX: usize = 4;

/// Outcome of encoding variable-length name information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameInfoEncoding {
    /// Prefix size + full payload size, even when the payload was cut.
    pub required: usize,
    /// Bytes actually placed in the buffer.
    pub written: usize,
    pub truncated: bool,
}

/// Encode a UTF-16 name as a 32-bit byte-length prefix plus UTF-16LE
/// payload.
///
/// The prefix always carries the *full* payload length so a caller seeing
/// truncation knows what to retry with. `None` if the buffer cannot even
/// hold the prefix.
pub fn write_name_info(buffer: &mut [u8], name: &[u16]) -> Option<NameInfoEncoding> {
    if buffer.len() < NAME_INFO_PREFIX {
        return None;
    }
    let payload_len = name.len() * 2;
    let mut cursor = Cursor::new(&mut *buffer);
    cursor.write_u32::<LittleEndian>(payload_len as u32).ok()?;

    let room = (buffer.len() - NAME_INFO_PREFIX) / 2;
    let copied = room.min(name.len());
    let mut cursor = Cursor::new(&mut buffer[NAME_INFO_PREFIX..]);
    for unit in &name[..copied] {
        cursor.write_u16::<LittleEndian>(*unit).ok()?;
    }

    Some(NameInfoEncoding {
        required: NAME_INFO_PREFIX + payload_len,
        written: NAME_INFO_PREFIX + copied * 2,
        truncated: copied < name.len(),
    })
}

// ============================================================================
// Attribute Flags & Reparse Tags
// ============================================================================

pub mod file_attributes {
    pub const READONLY: u32 = 0x00000001;
    pub const HIDDEN: u32 = 0x00000002;
    pub const SYSTEM: u32 = 0x00000004;
    pub const DIRECTORY: u32 = 0x00000010;
    pub const ARCHIVE: u32 = 0x00000020;
    pub const DEVICE: u32 = 0x00000040;
    pub const NORMAL: u32 = 0x00000080;
    pub const TEMPORARY: u32 = 0x00000100;
    pub const SPARSE_FILE: u32 = 0x00000200;
    pub const REPARSE_POINT: u32 = 0x00000400;
    pub const COMPRESSED: u32 = 0x00000800;
    pub const OFFLINE: u32 = 0x00001000;
    pub const NOT_CONTENT_INDEXED: u32 = 0x00002000;
    pub const ENCRYPTED: u32 = 0x00004000;
}

/// Reparse tag reported for host symbolic links.
pub const REPARSE_TAG_SYMLINK: u32 = 0xA000_000C;
