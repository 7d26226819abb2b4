//! Host file-API surface
//!
//! The query engine dispatches against [`HostFiles`] so the host OS stays
//! swappable: `UnixHost` is the production backend, tests substitute mocks
//! that fail on demand.

use crate::error::HostError;

#[cfg(unix)]
pub mod unix;
#[cfg(unix)]
pub use unix::UnixHost;

// ============================================================================
// Handles
// ============================================================================

/// Opaque guest file handle.
///
/// The backend decides what the raw value means (the Unix backend treats it
/// as a file descriptor). Zero is the null sentinel and is rejected before
/// any host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub const fn from_raw(raw: usize) -> Self {
        Handle(raw)
    }

    pub const fn as_raw(&self) -> usize {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

// ============================================================================
// Host-Shaped Query Results
// ============================================================================

/// Timestamp/attribute facet from the modern per-facet host query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostBasicInfo {
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
    pub change_time: u64,
    pub file_attributes: u32,
}

/// Size/link facet from the modern per-facet host query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStandardInfo {
    pub allocation_size: u64,
    pub end_of_file: u64,
    pub number_of_links: u32,
    pub delete_pending: bool,
    pub directory: bool,
}

/// Attribute/reparse facet from the modern per-facet host query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostAttributeTagInfo {
    pub file_attributes: u32,
    pub reparse_tag: u32,
}

/// Legacy whole-file query result. Carries no change time, no reparse tag,
/// and no delete-pending state; the engine derives those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostFileInformation {
    pub file_attributes: u32,
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
    pub file_size: u64,
    pub number_of_links: u32,
}

// ============================================================================
// Probe Surface
// ============================================================================

/// Host file APIs the engine probes, one method per call generation/facet.
///
/// The per-facet queries model the modern host API and may legitimately
/// report "unsupported" on hosts that lack them; `by_handle_info` is the
/// legacy whole-file query every host is expected to answer.
pub trait HostFiles {
    fn basic_info(&self, handle: Handle) -> Result<HostBasicInfo, HostError>;

    fn standard_info(&self, handle: Handle) -> Result<HostStandardInfo, HostError>;

    fn attribute_tag_info(&self, handle: Handle) -> Result<HostAttributeTagInfo, HostError>;

    /// Legacy whole-file metadata query.
    fn by_handle_info(&self, handle: Handle) -> Result<HostFileInformation, HostError>;

    /// Current cursor offset, obtained without moving the cursor.
    fn current_offset(&self, handle: Handle) -> Result<u64, HostError>;

    /// Full file name in guest (UTF-16) units, never truncated.
    fn file_name(&self, handle: Handle) -> Result<Vec<u16>, HostError>;
}
