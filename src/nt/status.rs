//! NTSTATUS vocabulary and host-error translation
//!
//! The guest parses these numeric values directly, so the discriminants are
//! part of the wire contract and must never change.

use crate::error::HostError;

// ============================================================================
// Status Codes
// ============================================================================

/// Guest-facing status vocabulary.
///
/// Closed enumeration; the engine never reports a code outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NtStatus {
    Success = 0x0000_0000,
    BufferOverflow = 0x8000_0005,
    Unsuccessful = 0xC000_0001,
    NotImplemented = 0xC000_0002,
    InvalidInfoClass = 0xC000_0003,
    InfoLengthMismatch = 0xC000_0004,
    InvalidHandle = 0xC000_0008,
    InvalidParameter = 0xC000_000D,
    InvalidDeviceRequest = 0xC000_0010,
    AccessDenied = 0xC000_0022,
    ObjectNameNotFound = 0xC000_0034,
    ObjectPathNotFound = 0xC000_003A,
    SharingViolation = 0xC000_0043,
    PrivilegeNotHeld = 0xC000_0061,
    InsufficientResources = 0xC000_009A,
    NotSupported = 0xC000_00BB,
}

impl NtStatus {
    /// Translate a host error into the guest status vocabulary.
    ///
    /// Total: every host error maps to exactly one status, with
    /// `Unsuccessful` as the fallback for unlisted raw codes.
    pub fn from_host(error: HostError) -> Self {
        match error {
            HostError::InvalidHandle => NtStatus::InvalidHandle,
            HostError::AccessDenied => NtStatus::AccessDenied,
            HostError::FileNotFound => NtStatus::ObjectNameNotFound,
            HostError::PathNotFound => NtStatus::ObjectPathNotFound,
            HostError::NotEnoughMemory => NtStatus::InsufficientResources,
            HostError::InvalidParameter => NtStatus::InvalidParameter,
            HostError::MoreData | HostError::BufferOverflow => NtStatus::BufferOverflow,
            HostError::NotSupported => NtStatus::NotSupported,
            HostError::SharingViolation => NtStatus::SharingViolation,
            HostError::PrivilegeNotHeld => NtStatus::PrivilegeNotHeld,
            HostError::InvalidFunction => NtStatus::InvalidDeviceRequest,
            HostError::CallNotImplemented => NtStatus::NotImplemented,
            HostError::Os(_) => NtStatus::Unsuccessful,
        }
    }

    /// NT_SUCCESS convention: severity bits clear. `BufferOverflow` is a
    /// warning and therefore not a success.
    pub fn is_success(&self) -> bool {
        (*self as u32) as i32 >= 0
    }

    /// Raw NTSTATUS value as the guest sees it.
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

impl From<HostError> for NtStatus {
    fn from(error: HostError) -> Self {
        NtStatus::from_host(error)
    }
}
